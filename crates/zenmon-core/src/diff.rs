//! 변화 감지와 알림 판정.
//!
//! 직전 스냅샷과 새 스냅샷을 비교해 총 건수 변동을 계산하고,
//! 사용자 정책(증감 방향, 관심 심각도)에 따라 알림 여부를 판정한다.
//! 전부 순수 함수다 — 공유 상태를 건드리지 않는다.

use crate::models::stats::{SeverityCounts, Stats};
use crate::severity::Severity;

/// 총 건수 변동 여부와 부호 있는 증감폭.
///
/// 최초 관측(직전 스냅샷의 `last_updated`가 `None`)은 변동으로 치지 않는다.
pub fn detect_total_change(previous: &Stats, current: &Stats) -> (bool, i64) {
    if previous.last_updated.is_none() || previous.total == current.total {
        return (false, 0);
    }
    (true, i64::from(current.total) - i64::from(previous.total))
}

/// 증감 방향 필터. delta가 0이면 항상 억제한다.
pub fn should_notify_on_delta(delta: i64, on_increase: bool, on_decrease: bool) -> bool {
    if delta > 0 {
        return on_increase;
    }
    if delta < 0 {
        return on_decrease;
    }
    false
}

/// 관심 심각도 중 건수가 달라진 것이 있는지 판정한다.
pub fn selected_levels_changed(
    previous: &SeverityCounts,
    current: &SeverityCounts,
    levels: &[Severity],
) -> bool {
    effective_levels(levels)
        .iter()
        .any(|level| previous.get(*level) != current.get(*level))
}

/// 알림 본문 구성.
///
/// 변동된 관심 심각도마다 "라벨 prev→curr" 조각을 만들어 잇는다.
/// 조각이 하나도 없으면 범용 문구로 대체한다. 총 건수는 항상 덧붙인다.
pub fn build_notify_message(
    previous: &SeverityCounts,
    current: &SeverityCounts,
    levels: &[Severity],
    total: u32,
) -> String {
    let selected = effective_levels(levels);
    let mut parts = Vec::with_capacity(4);
    for level in Severity::ALL {
        if selected.contains(&level) && previous.get(level) != current.get(level) {
            parts.push(format!(
                "{} {}→{}",
                level.label(),
                previous.get(level),
                current.get(level)
            ));
        }
    }
    if parts.is_empty() {
        return format!("选中等级数量变化，当前总数 {total}");
    }
    format!("等级变化：{}，当前总数 {}", parts.join("，"), total)
}

/// 빈 관심 목록은 전체 심각도로 본다
fn effective_levels(levels: &[Severity]) -> &[Severity] {
    if levels.is_empty() {
        &Severity::ALL
    } else {
        levels
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn observed(total: u32, severity: SeverityCounts) -> Stats {
        Stats {
            total,
            severity,
            last_updated: Some(Utc::now()),
        }
    }

    #[test]
    fn first_observation_is_never_a_change() {
        let never = Stats::default();
        let current = observed(42, SeverityCounts::default());
        assert_eq!(detect_total_change(&never, &current), (false, 0));
    }

    #[test]
    fn equal_totals_are_not_a_change() {
        let previous = observed(10, SeverityCounts::default());
        let current = observed(10, SeverityCounts::default());
        assert_eq!(detect_total_change(&previous, &current), (false, 0));
    }

    #[test]
    fn delta_is_signed_difference() {
        let previous = observed(10, SeverityCounts::default());
        let increased = observed(13, SeverityCounts::default());
        assert_eq!(detect_total_change(&previous, &increased), (true, 3));

        let decreased = observed(4, SeverityCounts::default());
        assert_eq!(detect_total_change(&previous, &decreased), (true, -6));
    }

    #[test]
    fn direction_filter() {
        assert!(should_notify_on_delta(5, true, false));
        assert!(!should_notify_on_delta(5, false, true));
        assert!(should_notify_on_delta(-5, false, true));
        assert!(!should_notify_on_delta(-5, true, false));
        assert!(!should_notify_on_delta(0, true, true));
    }

    #[test]
    fn level_filter_checks_only_selected_levels() {
        let previous = SeverityCounts {
            critical: 2,
            severe: 1,
            ..Default::default()
        };
        let current = SeverityCounts {
            critical: 3,
            severe: 1,
            ..Default::default()
        };
        assert!(selected_levels_changed(
            &previous,
            &current,
            &[Severity::Critical]
        ));
        assert!(!selected_levels_changed(
            &previous,
            &current,
            &[Severity::Severe, Severity::Minor]
        ));
    }

    #[test]
    fn empty_level_set_defaults_to_all() {
        let previous = SeverityCounts {
            minor: 1,
            ..Default::default()
        };
        let current = SeverityCounts {
            minor: 2,
            ..Default::default()
        };
        assert!(selected_levels_changed(&previous, &current, &[]));
    }

    #[test]
    fn message_renders_changed_selected_levels() {
        let previous = SeverityCounts {
            critical: 2,
            severe: 1,
            ..Default::default()
        };
        let current = SeverityCounts {
            critical: 3,
            severe: 1,
            ..Default::default()
        };
        let message = build_notify_message(&previous, &current, &[Severity::Critical], 9);
        assert!(message.contains("一级 2→3"));
        assert!(message.contains("9"));
        assert!(!message.contains("二级"));
    }

    #[test]
    fn message_joins_multiple_fragments_in_urgency_order() {
        let previous = SeverityCounts {
            critical: 1,
            minor: 5,
            ..Default::default()
        };
        let current = SeverityCounts {
            critical: 2,
            minor: 3,
            ..Default::default()
        };
        let message = build_notify_message(&previous, &current, &[], 20);
        assert!(message.contains("一级 1→2"));
        assert!(message.contains("四级 5→3"));
        let critical_pos = message.find("一级").unwrap();
        let minor_pos = message.find("四级").unwrap();
        assert!(critical_pos < minor_pos);
    }

    #[test]
    fn message_falls_back_when_no_fragment_applies() {
        let counts = SeverityCounts::default();
        let message = build_notify_message(&counts, &counts, &[Severity::Major], 7);
        assert_eq!(message, "选中等级数量变化，当前总数 7");
    }
}
