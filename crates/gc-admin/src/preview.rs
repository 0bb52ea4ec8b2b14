//! Upload preview for image file inputs.
//!
//! File reads complete asynchronously; a newer selection on the same input
//! supersedes any read still in flight.

pub const PREVIEW_CLASS: &str = "image_preview";
pub const PREVIEW_MAX_WIDTH_PX: u32 = 300;
pub const PREVIEW_MAX_HEIGHT_PX: u32 = 200;

pub fn image_style() -> String {
    format!("max-width: {PREVIEW_MAX_WIDTH_PX}px; max-height: {PREVIEW_MAX_HEIGHT_PX}px;")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PreviewTicket(u64);

#[derive(Debug, Default)]
pub struct PreviewSequencer {
    latest: u64,
}

impl PreviewSequencer {
    pub fn begin(&mut self) -> PreviewTicket {
        self.latest += 1;
        PreviewTicket(self.latest)
    }

    pub fn is_current(&self, ticket: PreviewTicket) -> bool {
        ticket.0 == self.latest
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_latest_read_may_render() {
        let mut seq = PreviewSequencer::default();
        let first = seq.begin();
        let second = seq.begin();
        assert!(!seq.is_current(first));
        assert!(seq.is_current(second));
    }

    #[test]
    fn image_is_bounded() {
        assert_eq!(image_style(), "max-width: 300px; max-height: 200px;");
    }
}
