use super::*;
use chrono::TimeZone;

#[test]
fn fake_clock_advances_by_delta() {
    let start = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
    let clock = FakeClock::new(start);
    clock.advance(chrono::Duration::seconds(5));
    assert_eq!(clock.now(), start + chrono::Duration::seconds(5));
}

#[test]
fn fake_clock_set_overrides_absolutely() {
    let clock = FakeClock::new(Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap());
    let later = Utc.with_ymd_and_hms(2030, 6, 1, 12, 0, 0).unwrap();
    clock.set(later);
    assert_eq!(clock.now(), later);
}

#[test]
fn system_clock_moves_forward() {
    let clock = SystemClock;
    let a = clock.now();
    std::thread::sleep(std::time::Duration::from_millis(5));
    let b = clock.now();
    assert!(b >= a);
}
