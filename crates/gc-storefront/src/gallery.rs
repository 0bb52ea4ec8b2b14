//! Product image gallery.

/// Thumbnail strip plus the primary image it drives.
///
/// At most one thumbnail is active; after any [`Gallery::select`] with a
/// valid index exactly one is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gallery {
    sources: Vec<String>,
    active: Option<usize>,
}

impl Gallery {
    /// `sources` holds each thumbnail's image source in document order.
    /// An out-of-range `active` is ignored.
    pub fn new(sources: Vec<String>, active: Option<usize>) -> Self {
        let active = active.filter(|index| *index < sources.len());
        Self { sources, active }
    }

    pub fn len(&self) -> usize {
        self.sources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sources.is_empty()
    }

    pub fn active(&self) -> Option<usize> {
        self.active
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active == Some(index)
    }

    /// Activate a thumbnail and return the source the main image must show.
    /// A thumbnail without an image source is not selectable.
    pub fn select(&mut self, index: usize) -> Option<&str> {
        let source = self.sources.get(index).filter(|src| !src.is_empty())?;
        self.active = Some(index);
        Some(source.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gallery() -> Gallery {
        Gallery::new(
            vec![
                "/media/a.jpg".to_owned(),
                "/media/b.jpg".to_owned(),
                "/media/c.jpg".to_owned(),
            ],
            Some(0),
        )
    }

    #[test]
    fn exactly_one_thumbnail_is_active_after_each_click() {
        let mut gallery = gallery();
        for index in [2, 1, 1, 0, 2] {
            assert!(gallery.select(index).is_some());
            let active: Vec<usize> = (0..gallery.len()).filter(|i| gallery.is_active(*i)).collect();
            assert_eq!(active, vec![index]);
        }
    }

    #[test]
    fn select_returns_the_thumbnail_source() {
        let mut gallery = gallery();
        assert_eq!(gallery.select(1), Some("/media/b.jpg"));
    }

    #[test]
    fn unknown_index_leaves_state_alone() {
        let mut gallery = gallery();
        assert_eq!(gallery.select(7), None);
        assert_eq!(gallery.active(), Some(0));
    }

    #[test]
    fn out_of_range_initial_active_is_dropped() {
        let gallery = Gallery::new(vec!["/x.jpg".to_owned()], Some(3));
        assert_eq!(gallery.active(), None);
    }

    #[test]
    fn thumbnail_without_source_keeps_current_image() {
        let mut gallery = Gallery::new(vec!["/a.jpg".into(), String::new()], Some(0));

        assert_eq!(gallery.select(1), None);
        assert_eq!(gallery.active(), Some(0));
        assert!(!gallery.is_active(1));
    }
}
