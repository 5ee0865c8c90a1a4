use std::cmp::Ordering;

use tracing::debug;
use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::columns::ColumnId;
use crate::dataset::{FieldValue, Row};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            SortDirection::Ascending => "▲",
            SortDirection::Descending => "▼",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortState {
    pub order_by: ColumnId,
    pub direction: SortDirection,
}

impl Default for SortState {
    fn default() -> Self {
        Self {
            order_by: ColumnId::Id,
            direction: SortDirection::Ascending,
        }
    }
}

impl SortState {
    /// Clicking the active column flips the direction, any other column
    /// becomes active in ascending order.
    pub fn request_sort(&mut self, column: ColumnId) {
        if self.order_by == column {
            self.direction = self.direction.flipped();
        } else {
            self.order_by = column;
            self.direction = SortDirection::Ascending;
        }
        debug!("Sorting by {} {:?}", self.order_by, self.direction);
    }

    pub fn direction_of(&self, column: ColumnId) -> Option<SortDirection> {
        (self.order_by == column).then_some(self.direction)
    }
}

pub fn compare(a: &Row, b: &Row, state: &SortState) -> Ordering {
    let ordering = match state.order_by {
        ColumnId::RegisteredDate => match (a.registered_at(), b.registered_at()) {
            (Some(x), Some(y)) => x.cmp(&y),
            // An unparsable date has no place in the order
            _ => Ordering::Equal,
        },
        ColumnId::FullName => locale_compare(&a.full_name(), &b.full_name()),
        column => match (a.value(column), b.value(column)) {
            (FieldValue::Text(x), FieldValue::Text(y)) => locale_compare(&x, &y),
            (x, y) => as_number(&x)
                .partial_cmp(&as_number(&y))
                .unwrap_or(Ordering::Equal),
        },
    };
    state.direction.apply(ordering)
}

fn as_number(value: &FieldValue<'_>) -> f64 {
    match value {
        FieldValue::Integer(i) => *i as f64,
        FieldValue::Bool(b) => f64::from(u8::from(*b)),
        FieldValue::Text(s) => s.trim().parse().unwrap_or(f64::NAN),
    }
}

/// Letters first, ignoring accents and case. Ties are broken by accents,
/// then lower case before upper case, then code points.
pub fn locale_compare(a: &str, b: &str) -> Ordering {
    base_letters(a)
        .cmp(base_letters(b))
        .then_with(|| {
            a.nfd()
                .flat_map(char::to_lowercase)
                .cmp(b.nfd().flat_map(char::to_lowercase))
        })
        .then_with(|| {
            a.chars()
                .map(char::is_uppercase)
                .cmp(b.chars().map(char::is_uppercase))
        })
        .then_with(|| a.cmp(b))
}

fn base_letters(s: &str) -> impl Iterator<Item = char> + '_ {
    s.nfd()
        .filter(|c| !is_combining_mark(*c))
        .flat_map(char::to_lowercase)
}

/// Positions of `rows` in sorted order. The sort is stable, so rows comparing
/// equal keep their window order.
pub fn sorted_positions(rows: &[Row], state: &SortState) -> Vec<usize> {
    let mut positions: Vec<usize> = (0..rows.len()).collect();
    positions.sort_by(|&a, &b| compare(&rows[a], &rows[b], state));
    positions
}
