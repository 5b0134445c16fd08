//! Page links and page-size choices

use ballpark_core::Pager;

/// Page links for the group containing the current page
///
/// Renders as `< 6 [7] 8 9 10 >`, with the arrows present only when an earlier or
/// later group exists.
pub fn render_page_links(pager: &Pager, total: usize, group_size: usize) -> String {
    let group = pager.page_group(total, group_size);
    let mut parts = Vec::new();
    if group.has_prev {
        parts.push("<".to_string());
    }
    for page in group.pages() {
        if page == pager.current_page() {
            parts.push(format!("[{page}]"));
        } else {
            parts.push(page.to_string());
        }
    }
    if group.has_next {
        parts.push(">".to_string());
    }
    parts.join(" ")
}

/// Position summary such as `Page 2 of 5, 43 records`
pub fn render_summary(pager: &Pager, total: usize) -> String {
    format!(
        "Page {} of {}, {total} records, {} per page",
        pager.current_page(),
        pager.total_pages(total).max(1),
        pager.page_size()
    )
}

/// Validate a requested page size against the configured choices
pub fn choose_page_size(options: &[usize], requested: usize) -> crate::Result<usize> {
    if options.contains(&requested) {
        Ok(requested)
    } else {
        Err(crate::ConsoleError::invalid_argument(format!(
            "page size {requested} is not one of {options:?}"
        )))
    }
}
