//! Bounded sliding-window page links

/// A first/last page link shown outside the window, with an optional
/// ellipsis marking the gap towards the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Edge {
    pub page: u32,
    pub ellipsis: bool,
}

/// Page-link control state: a window of page numbers centered on the
/// current page, clamped to the valid range and kept full near the ends,
/// plus edge links and prev/next enablement. Pages are 1-based for display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PagerModel {
    pub current: u32,
    pub total: u32,
    pub window: Vec<u32>,
    pub leading: Option<Edge>,
    pub trailing: Option<Edge>,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl PagerModel {
    pub fn build(current: u32, total: u32, window_size: usize) -> Self {
        let total = total.max(1);
        let current = current.clamp(1, total);
        let width = window_size.max(1) as u32;
        let half = width / 2;

        let mut start = current.saturating_sub(half).max(1);
        let mut end = (current + half).min(total);

        // Near an edge the centered range comes up short; extend the other
        // end so the window stays full where possible.
        if end - start + 1 < width {
            if start == 1 {
                end = (start + width - 1).min(total);
            } else if end == total {
                start = end.saturating_sub(width - 1).max(1);
            }
        }

        let leading = (start > 1).then_some(Edge {
            page: 1,
            ellipsis: start > 2,
        });
        let trailing = (end < total).then_some(Edge {
            page: total,
            ellipsis: end < total - 1,
        });

        Self {
            current,
            total,
            window: (start..=end).collect(),
            leading,
            trailing,
            prev_enabled: current > 1,
            next_enabled: current < total,
        }
    }
}
