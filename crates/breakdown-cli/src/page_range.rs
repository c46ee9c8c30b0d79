/// Parse a 1-based page range like "1,3-5" into sorted, deduplicated
/// 0-based page indices, checked against `page_count`.
pub fn parse_page_range(input: &str, page_count: usize) -> Result<Vec<usize>, String> {
    let mut pages = Vec::new();
    for part in input.split(',').map(str::trim).filter(|p| !p.is_empty()) {
        let (first, last) = match part.split_once('-') {
            Some((a, b)) => (page_number(a, page_count)?, page_number(b, page_count)?),
            None => {
                let page = page_number(part, page_count)?;
                (page, page)
            }
        };
        if first > last {
            return Err(format!("reversed page range: '{part}'"));
        }
        pages.extend((first..=last).map(|p| p - 1));
    }
    pages.sort_unstable();
    pages.dedup();
    Ok(pages)
}

fn page_number(text: &str, page_count: usize) -> Result<usize, String> {
    let text = text.trim();
    let page: usize = text
        .parse()
        .map_err(|_| format!("invalid page number: '{text}'"))?;
    if page == 0 {
        return Err("page 0 is invalid (pages start at 1)".to_string());
    }
    if page > page_count {
        return Err(format!(
            "page {page} exceeds document page count ({page_count})"
        ));
    }
    Ok(page)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_pages_and_ranges() {
        assert_eq!(parse_page_range("2", 4).unwrap(), vec![1]);
        assert_eq!(parse_page_range("1,3-4", 4).unwrap(), vec![0, 2, 3]);
    }

    #[test]
    fn overlapping_parts_deduplicate() {
        assert_eq!(parse_page_range("3-4, 1-3 ,2", 4).unwrap(), vec![0, 1, 2, 3]);
    }

    #[test]
    fn empty_parts_are_skipped() {
        assert_eq!(parse_page_range("1,,2,", 2).unwrap(), vec![0, 1]);
    }

    #[test]
    fn rejects_bad_input() {
        assert!(parse_page_range("0", 4).unwrap_err().contains("invalid"));
        assert!(parse_page_range("5", 4).unwrap_err().contains("exceeds"));
        assert!(parse_page_range("x", 4).unwrap_err().contains("invalid page number"));
        assert!(parse_page_range("3-1", 4).unwrap_err().contains("reversed"));
    }
}
