//! 버그 목록 페이지 추출기.
//!
//! 알려진 여러 DOM 형태를 우선순위대로 시도하는 best-effort 셀렉터 계층.
//! 어떤 형태에도 맞지 않으면 0건 스냅샷을 낸다 — 에러가 아니다.
//! 같은 HTML 입력에는 항상 같은 결과를 낸다.

use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};

use zenmon_core::models::stats::{SeverityCounts, Stats};
use zenmon_core::severity;

fn sel(source: &str) -> Selector {
    Selector::parse(source).expect("정적 셀렉터")
}

/// 행 후보 셀렉터 — 구체적인 것부터. 첫 번째로 행을 내는 후보가 이긴다.
static ROW_CANDIDATES: Lazy<Vec<Selector>> = Lazy::new(|| {
    vec![
        sel("table#bugList tbody tr"),
        sel("#bugList tbody tr"),
        sel("table.datatable tbody tr"),
        sel("table tbody tr"),
    ]
});

static TD: Lazy<Selector> = Lazy::new(|| sel("td"));
static BUG_LIST_HEADERS: Lazy<Selector> = Lazy::new(|| sel("table#bugList thead th"));
static TABLE_HEADERS: Lazy<Selector> = Lazy::new(|| sel("table thead th"));
static THIRD_CELL_SPAN: Lazy<Selector> = Lazy::new(|| sel("td:nth-child(3) span"));

/// 심각도 셀로 알려진 CSS 마커들
static SEVERITY_CELLS: Lazy<Vec<Selector>> = Lazy::new(|| {
    vec![
        sel("td.c-severity"),
        sel("td.severity"),
        sel("td[data-col='severity']"),
        sel("td[data-type='severity']"),
    ]
});

/// 페이지가 선언한 총 건수를 담는 것으로 알려진 요소들
static TOTAL_CANDIDATES: Lazy<Vec<Selector>> = Lazy::new(|| {
    vec![
        sel("#bugCount"),
        sel(".pager .page-summary"),
        sel(".pager .total"),
        sel(".page-summary"),
        sel(".table-footer"),
        sel(".table-actions"),
    ]
});

/// 파싱된 문서에서 스냅샷을 추출한다. 관측 시각은 호출부가 찍는다.
pub fn parse_stats(doc: &Html) -> Stats {
    let severity_index = find_severity_index(doc);
    let rows = find_bug_rows(doc);

    let mut counts = SeverityCounts::default();
    for row in &rows {
        let text = extract_severity_text(row, severity_index);
        if let Some(level) = severity::classify(&text) {
            counts.bump(level);
        }
    }

    // 선언된 총 건수가 있으면 행 수보다 우선한다 —
    // 헤더의 총계는 현재 페이지에 렌더링되지 않은 행까지 포함할 수 있다
    let mut total = parse_total_count(doc);
    if total == 0 {
        total = rows.len() as u32;
    }

    Stats {
        total,
        severity: counts,
        last_updated: None,
    }
}

/// 데이터 셀을 가진 행을 내는 첫 후보 셀렉터의 행 목록.
/// 전부 비면 가장 구체적인 셀렉터로 폴백한다 (빈 목록, 에러 아님).
fn find_bug_rows(doc: &Html) -> Vec<ElementRef<'_>> {
    for candidate in ROW_CANDIDATES.iter() {
        let rows: Vec<ElementRef<'_>> = doc
            .select(candidate)
            .filter(|row| row.select(&TD).next().is_some())
            .collect();
        if !rows.is_empty() {
            return rows;
        }
    }
    doc.select(&ROW_CANDIDATES[0]).collect()
}

/// 헤더 셀에서 심각도 컬럼 인덱스를 찾는다. 마지막 매칭이 이긴다 —
/// 동의어 헤더가 여럿이면 가장 오른쪽을 정본으로 본다.
fn find_severity_index(doc: &Html) -> Option<usize> {
    let mut headers: Vec<ElementRef<'_>> = doc.select(&BUG_LIST_HEADERS).collect();
    if headers.is_empty() {
        headers = doc.select(&TABLE_HEADERS).collect();
    }

    let mut index = None;
    for (i, header) in headers.iter().enumerate() {
        let text = element_text(header);
        let lower = text.to_lowercase();
        if text.contains("严重") || text.contains("致命") || lower.contains("severity") {
            index = Some(i);
        }
    }
    index
}

/// 행에서 심각도 텍스트 후보를 우선순위대로 뽑는다.
/// 첫 번째 비어 있지 않은 후보가 이긴다.
fn extract_severity_text(row: &ElementRef<'_>, index: Option<usize>) -> String {
    if let Some(span) = row.select(&THIRD_CELL_SPAN).next() {
        let text = element_text(&span);
        if !text.is_empty() {
            return text;
        }
    }

    for selector in SEVERITY_CELLS.iter() {
        if let Some(cell) = row.select(selector).next() {
            let text = element_text(&cell);
            if !text.is_empty() {
                return text;
            }
        }
    }

    if let Some(i) = index {
        let cells: Vec<ElementRef<'_>> = row.select(&TD).collect();
        if i < cells.len() {
            return element_text(&cells[i]);
        }
    }

    String::new()
}

/// 선언된 총 건수. 후보 요소들에서 처음 발견한 양의 정수, 없으면 0.
fn parse_total_count(doc: &Html) -> u32 {
    for selector in TOTAL_CANDIDATES.iter() {
        if let Some(element) = doc.select(selector).next() {
            if let Some(count) = severity::first_embedded_number(&element_text(&element)) {
                if count > 0 {
                    return count;
                }
            }
        }
    }
    0
}

fn element_text(element: &ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}
