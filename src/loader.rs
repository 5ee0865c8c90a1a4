use tracing::{debug, trace};

use crate::dataset::{Dataset, Row};

/// The materialized prefix of the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowWindow {
    pub len: usize,
    pub has_more: bool,
}

/// Grows a [`RowWindow`] over a dataset page by page.
#[derive(Debug, Clone)]
pub struct IncrementalLoader {
    dataset: Dataset,
    initial_rows: usize,
    page_size: usize,
}

impl IncrementalLoader {
    pub fn new(dataset: Dataset, initial_rows: usize, page_size: usize) -> Self {
        Self {
            dataset,
            initial_rows,
            page_size,
        }
    }

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn initial(&self) -> RowWindow {
        let window = RowWindow {
            len: self.initial_rows.min(self.dataset.len()),
            has_more: self.dataset.len() > self.initial_rows,
        };
        debug!("Initial window {window:?} of {} rows", self.dataset.len());
        window
    }

    /// Appends the next page. Once the window covers the dataset this is a no-op.
    pub fn load_more(&self, window: &RowWindow) -> RowWindow {
        if !window.has_more {
            trace!("Nothing more to load");
            return *window;
        }
        let total = self.dataset.len();
        let len = (window.len + self.page_size).min(total);
        let next = RowWindow {
            len,
            has_more: len < total,
        };
        debug!("Loaded rows {}..{len} of {total}", window.len);
        next
    }

    pub fn rows(&self, window: &RowWindow) -> &[Row] {
        self.dataset.slice(0..window.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn loader(nrows: usize) -> IncrementalLoader {
        IncrementalLoader::new(Dataset::generate(nrows, 3), 15, 10)
    }

    #[test]
    fn grows_in_pages_until_exhausted() {
        let loader = loader(32);

        let window = loader.initial();
        assert_eq!(window, RowWindow { len: 15, has_more: true });
        assert_eq!(loader.rows(&window).len(), 15);

        let window = loader.load_more(&window);
        assert_eq!(window, RowWindow { len: 25, has_more: true });

        let window = loader.load_more(&window);
        assert_eq!(window, RowWindow { len: 32, has_more: false });
        assert_eq!(loader.rows(&window).len(), 32);

        let window = loader.load_more(&window);
        assert_eq!(window, RowWindow { len: 32, has_more: false });
    }

    #[rstest]
    #[case(0, 0, false)]
    #[case(7, 7, false)]
    #[case(15, 15, false)]
    #[case(16, 15, true)]
    fn small_datasets_fit_the_initial_window(
        #[case] nrows: usize,
        #[case] len: usize,
        #[case] has_more: bool,
    ) {
        assert_eq!(loader(nrows).initial(), RowWindow { len, has_more });
    }

    #[test]
    fn exact_page_boundary_stops_loading() {
        let loader = loader(25);
        let window = loader.load_more(&loader.initial());
        assert_eq!(window, RowWindow { len: 25, has_more: false });
    }

    #[test]
    fn window_is_a_prefix_in_dataset_order() {
        let loader = loader(40);
        let window = loader.load_more(&loader.initial());
        let ids: Vec<u64> = loader.rows(&window).iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=25).collect::<Vec<u64>>());
    }
}
