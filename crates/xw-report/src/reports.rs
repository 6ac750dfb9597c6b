//! Column lists and row builders for each registered report.
//!
//! Each submodule turns one analysis from `xw-analytics` into a [`RowSet`].
//! Multi-valued cells (clue lists, links) are joined with `<br />` for the
//! table widget; HTML is written as-is.

use xw_analytics::vocabulary::DuplicateGroup;

use crate::registry::AnalysisContext;
use crate::rowset::{Cell, Column, RowSet};

const LINE_BREAK: &str = "<br />";

fn join_lines<I, S>(items: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    items
        .into_iter()
        .map(|s| s.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(LINE_BREAK)
}

fn duplicate_rows(ctx: &AnalysisContext<'_>, groups: Vec<DuplicateGroup>, set: &mut RowSet) {
    for group in groups {
        let clues = join_lines(group.mentions.iter().map(|m| m.clue.as_str()));
        let types = join_lines(group.mentions.iter().map(|m| m.crossword_type.as_str()));
        let links = join_lines(
            group
                .mentions
                .iter()
                .map(|m| ctx.crossword_link(&m.crossword_id, &m.crossword_number)),
        );
        set.push(vec![
            group.setter.into(),
            group.key.into(),
            group.mentions.len().into(),
            clues.into(),
            types.into(),
            links.into(),
        ]);
    }
}

pub mod setter_totals {
    use super::{AnalysisContext, Column, RowSet};

    pub const COLUMNS: &[Column] = &[
        Column::text("Setter"),
        Column::integer("Cryptic"),
        Column::integer("Prize"),
        Column::integer("Other"),
        Column::integer("Total"),
    ];

    pub fn compute(ctx: &AnalysisContext<'_>) -> RowSet {
        let mut set = RowSet::new(COLUMNS);
        for row in xw_analytics::activity::setter_totals(ctx.corpus) {
            set.push(vec![
                row.setter.into(),
                row.counts.cryptic.into(),
                row.counts.prize.into(),
                row.counts.other.into(),
                row.counts.total().into(),
            ]);
        }
        set
    }
}

pub mod yearly_activity {
    use super::{AnalysisContext, Column, RowSet};

    pub const COLUMNS: &[Column] = &[
        Column::text("Setter"),
        Column::integer("Year"),
        Column::integer("Crosswords"),
    ];

    pub fn compute(ctx: &AnalysisContext<'_>) -> RowSet {
        let mut set = RowSet::new(COLUMNS);
        for row in xw_analytics::activity::yearly_activity(ctx.corpus) {
            set.push(vec![row.setter.into(), row.year.into(), row.crosswords.into()]);
        }
        set
    }
}

pub mod repeat_peaks {
    use super::{AnalysisContext, Column, RowSet};

    pub const COLUMNS: &[Column] = &[
        Column::text("Setter"),
        Column::text("Answer"),
        Column::integer("Uses"),
    ];

    pub fn compute(ctx: &AnalysisContext<'_>) -> RowSet {
        let mut set = RowSet::new(COLUMNS);
        for row in xw_analytics::vocabulary::repeat_peaks(ctx.corpus) {
            set.push(vec![row.setter.into(), row.solution.into(), row.peak.into()]);
        }
        set
    }
}

pub mod setter_profiles {
    use super::{AnalysisContext, Column, RowSet};

    pub const COLUMNS: &[Column] = &[
        Column::text("Setter"),
        Column::text("First crossword"),
        Column::text("Last crossword"),
        Column::text("Tenure"),
        Column::integer("Cryptic"),
        Column::integer("Prize"),
        Column::integer("Other"),
        Column::integer("Total"),
        Column::integer("Self references"),
    ];

    pub fn compute(ctx: &AnalysisContext<'_>) -> RowSet {
        let mut set = RowSet::new(COLUMNS);
        for row in xw_analytics::activity::setter_profiles(ctx.corpus) {
            set.push(vec![
                row.setter.into(),
                row.first.to_string().into(),
                row.last.to_string().into(),
                row.tenure.to_string().into(),
                row.counts.cryptic.into(),
                row.counts.prize.into(),
                row.counts.other.into(),
                row.counts.total().into(),
                row.self_references.into(),
            ]);
        }
        set
    }
}

pub mod duplicate_answers {
    use super::{AnalysisContext, Column, RowSet, duplicate_rows};

    pub const COLUMNS: &[Column] = &[
        Column::text("Setter"),
        Column::text("Answer"),
        Column::integer("Count"),
        Column::text("Clues"),
        Column::text("Type"),
        Column::html("Crossword"),
    ];

    pub fn compute(ctx: &AnalysisContext<'_>) -> RowSet {
        let mut set = RowSet::new(COLUMNS);
        let groups = xw_analytics::vocabulary::duplicate_answers(ctx.corpus, &ctx.resolved);
        duplicate_rows(ctx, groups, &mut set);
        set
    }
}

pub mod duplicate_clues {
    use super::{AnalysisContext, Column, RowSet, duplicate_rows};

    pub const COLUMNS: &[Column] = &[
        Column::text("Setter"),
        Column::text("Clue"),
        Column::integer("Count"),
        Column::text("Clues"),
        Column::text("Type"),
        Column::html("Crossword"),
    ];

    pub fn compute(ctx: &AnalysisContext<'_>) -> RowSet {
        let mut set = RowSet::new(COLUMNS);
        let groups = xw_analytics::vocabulary::duplicate_clues(ctx.corpus, &ctx.resolved);
        duplicate_rows(ctx, groups, &mut set);
        set
    }
}

pub mod pdf_crosswords {
    use super::{AnalysisContext, Column, RowSet};

    pub const COLUMNS: &[Column] = &[
        Column::text("Setter"),
        Column::text("Number"),
        Column::html("PDF"),
        Column::text("Date"),
    ];

    pub fn compute(ctx: &AnalysisContext<'_>) -> RowSet {
        let mut set = RowSet::new(COLUMNS);
        for row in xw_analytics::activity::pdf_crosswords(ctx.corpus) {
            let link = format!("<a href=\"{}\">{}</a>", row.pdf_url, row.number);
            set.push(vec![
                row.setter.into(),
                row.number.into(),
                link.into(),
                row.date.to_string().into(),
            ]);
        }
        set
    }
}

pub mod most_used_answers {
    use super::{AnalysisContext, Column, RowSet};

    pub const COLUMNS: &[Column] = &[Column::text("Answer"), Column::integer("Uses")];

    pub fn compute(ctx: &AnalysisContext<'_>) -> RowSet {
        let mut set = RowSet::new(COLUMNS);
        for row in xw_analytics::vocabulary::most_used_answers(ctx.corpus, ctx.config.top_answers)
        {
            set.push(vec![row.solution.into(), row.count.into()]);
        }
        set
    }
}

pub mod uniqueness_ratio {
    use super::{AnalysisContext, Column, RowSet};

    pub const COLUMNS: &[Column] = &[
        Column::text("Setter"),
        Column::integer("Unique answers"),
        Column::integer("Total answers"),
        Column::decimal("Ratio"),
    ];

    pub fn compute(ctx: &AnalysisContext<'_>) -> RowSet {
        let mut set = RowSet::new(COLUMNS);
        for row in xw_analytics::vocabulary::uniqueness_ratio(ctx.corpus) {
            set.push(vec![
                row.setter.into(),
                row.unique.into(),
                row.total.into(),
                row.ratio.into(),
            ]);
        }
        set
    }
}

pub mod average_clue_length {
    use super::{AnalysisContext, Column, RowSet};

    pub const COLUMNS: &[Column] = &[
        Column::text("Setter"),
        Column::integer("Clues"),
        Column::decimal("Average length"),
    ];

    pub fn compute(ctx: &AnalysisContext<'_>) -> RowSet {
        let mut set = RowSet::new(COLUMNS);
        for row in xw_analytics::vocabulary::average_clue_length(ctx.corpus, &ctx.resolved) {
            set.push(vec![row.setter.into(), row.clues.into(), row.average.into()]);
        }
        set
    }
}

pub mod direction_balance {
    use super::{AnalysisContext, Column, RowSet};

    pub const COLUMNS: &[Column] = &[
        Column::text("Setter"),
        Column::integer("Across"),
        Column::integer("Down"),
        Column::integer("Total"),
    ];

    pub fn compute(ctx: &AnalysisContext<'_>) -> RowSet {
        let mut set = RowSet::new(COLUMNS);
        for row in xw_analytics::activity::direction_balance(ctx.corpus) {
            let total = row.total();
            set.push(vec![
                row.setter.into(),
                row.counts.across.into(),
                row.counts.down.into(),
                total.into(),
            ]);
        }
        set
    }
}

pub mod debut_years {
    use super::{AnalysisContext, Column, RowSet};

    pub const COLUMNS: &[Column] = &[
        Column::integer("Year"),
        Column::integer("Debuts"),
        Column::text("Setters"),
    ];

    pub fn compute(ctx: &AnalysisContext<'_>) -> RowSet {
        let mut set = RowSet::new(COLUMNS);
        for row in xw_analytics::activity::debut_years(ctx.corpus) {
            set.push(vec![
                row.year.into(),
                row.setters.len().into(),
                row.setters.join(", ").into(),
            ]);
        }
        set
    }
}

pub mod monthly_cadence {
    use super::{AnalysisContext, Column, RowSet};

    pub const COLUMNS: &[Column] = &[Column::text("Month"), Column::integer("Crosswords")];

    pub fn compute(ctx: &AnalysisContext<'_>) -> RowSet {
        let mut set = RowSet::new(COLUMNS);
        for row in xw_analytics::activity::monthly_cadence(ctx.corpus) {
            set.push(vec![row.name.into(), row.crosswords.into()]);
        }
        set
    }
}

fn streak_rows(ctx: &AnalysisContext<'_>, granularity: xw_analytics::Granularity, set: &mut RowSet) {
    for streak in xw_analytics::detect_streaks(ctx.corpus, granularity) {
        set.push(vec![
            Cell::from(streak.setter),
            streak.length.into(),
            streak.start.into(),
            streak.end.into(),
            streak.puzzles.into(),
        ]);
    }
}

pub mod weekly_streaks {
    use xw_analytics::Granularity;

    use super::{AnalysisContext, Column, RowSet, streak_rows};

    pub const COLUMNS: &[Column] = &[
        Column::text("Setter"),
        Column::integer("Weeks"),
        Column::text("First week"),
        Column::text("Last week"),
        Column::integer("Crosswords"),
    ];

    pub fn compute(ctx: &AnalysisContext<'_>) -> RowSet {
        let mut set = RowSet::new(COLUMNS);
        streak_rows(ctx, Granularity::Weekly, &mut set);
        set
    }
}

pub mod monthly_streaks {
    use xw_analytics::Granularity;

    use super::{AnalysisContext, Column, RowSet, streak_rows};

    pub const COLUMNS: &[Column] = &[
        Column::text("Setter"),
        Column::integer("Months"),
        Column::text("First month"),
        Column::text("Last month"),
        Column::integer("Crosswords"),
    ];

    pub fn compute(ctx: &AnalysisContext<'_>) -> RowSet {
        let mut set = RowSet::new(COLUMNS);
        streak_rows(ctx, Granularity::Monthly, &mut set);
        set
    }
}
