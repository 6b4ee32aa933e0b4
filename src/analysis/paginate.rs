use crate::models::view::TablePage;

/// Slices one 1-based page out of `items`. Out-of-range pages are clamped.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> TablePage<T> {
    let per_page = per_page.max(1);
    let total = items.len();
    let page_count = total.div_ceil(per_page);
    let page = page.clamp(1, page_count.max(1));

    let start = ((page - 1) * per_page).min(total);
    let end = (start + per_page).min(total);

    TablePage {
        rows: items[start..end].to_vec(),
        page,
        page_count,
        total,
        has_prev: page > 1,
        has_next: page < page_count,
    }
}
