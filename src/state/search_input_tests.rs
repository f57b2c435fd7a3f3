//! Tests for the debounced search input.

use super::*;

fn input() -> SearchInput {
    SearchInput::new("", DEFAULT_DEBOUNCE)
}

fn ms(n: u64) -> Duration {
    Duration::from_millis(n)
}

// ===== Immediate changes =====

#[test]
fn every_keystroke_updates_displayed_text() {
    let t0 = Instant::now();
    let mut input = input();
    let mut immediate = Vec::new();

    immediate.push(input.insert_char('a', t0).to_string());
    immediate.push(input.insert_char('b', t0 + ms(100)).to_string());
    immediate.push(input.insert_char('c', t0 + ms(200)).to_string());

    assert_eq!(immediate, vec!["a", "ab", "abc"]);
    assert_eq!(input.text(), "abc");
}

#[test]
fn immediate_change_does_not_settle() {
    let t0 = Instant::now();
    let mut input = input();
    input.insert_char('x', t0);

    assert!(input.is_pending());
    assert_eq!(input.poll(t0), None);
    assert_eq!(input.poll(t0 + ms(499)), None);
}

// ===== Settling =====

#[test]
fn rapid_changes_settle_once_with_last_value() {
    let t0 = Instant::now();
    let mut input = input();
    let mut settled = Vec::new();

    input.set_text("a", t0);
    settled.extend(input.poll(t0 + ms(100)));
    input.set_text("ab", t0 + ms(100));
    settled.extend(input.poll(t0 + ms(300)));
    input.set_text("abc", t0 + ms(300));

    for step in 0..20 {
        settled.extend(input.poll(t0 + ms(300 + step * 100)));
    }

    assert_eq!(settled, vec!["abc".to_string()]);
    assert_eq!(
        input.phase(),
        &DebouncePhase::Settled {
            value: "abc".to_string()
        }
    );
}

#[test]
fn settles_exactly_at_deadline() {
    let t0 = Instant::now();
    let mut input = input();
    input.insert_char('q', t0);

    assert_eq!(input.poll(t0 + ms(500)), Some("q".to_string()));
    assert_eq!(input.poll(t0 + ms(1000)), None, "settles only once");
}

#[test]
fn each_edit_restarts_the_window() {
    let t0 = Instant::now();
    let mut input = input();
    input.insert_char('a', t0);
    input.insert_char('b', t0 + ms(400));

    assert_eq!(input.poll(t0 + ms(800)), None);
    assert_eq!(input.poll(t0 + ms(900)), Some("ab".to_string()));
}

#[test]
fn edit_after_settle_starts_new_window() {
    let t0 = Instant::now();
    let mut input = input();
    input.insert_char('a', t0);
    assert_eq!(input.poll(t0 + ms(500)), Some("a".to_string()));

    input.backspace(t0 + ms(600));
    assert!(input.is_pending());
    assert_eq!(input.poll(t0 + ms(1100)), Some(String::new()));
}

#[test]
fn custom_window_is_respected() {
    let t0 = Instant::now();
    let mut input = SearchInput::new("", ms(50));
    input.insert_char('z', t0);
    assert_eq!(input.poll(t0 + ms(49)), None);
    assert_eq!(input.poll(t0 + ms(50)), Some("z".to_string()));
}

#[test]
fn time_until_settle_counts_down() {
    let t0 = Instant::now();
    let mut input = input();
    assert_eq!(input.time_until_settle(t0), None);

    input.insert_char('a', t0);
    assert_eq!(input.time_until_settle(t0 + ms(200)), Some(ms(300)));
    assert_eq!(input.time_until_settle(t0 + ms(900)), Some(Duration::ZERO));
}

// ===== Teardown =====

#[test]
fn cancel_drops_pending_value() {
    let t0 = Instant::now();
    let mut input = input();
    input.insert_char('a', t0);
    input.cancel();

    assert_eq!(input.phase(), &DebouncePhase::Idle);
    assert_eq!(input.poll(t0 + ms(10_000)), None);
    assert_eq!(input.text(), "a", "displayed text survives cancel");
}

#[test]
fn cancel_keeps_settled_state() {
    let mut input = SearchInput::new("rust", DEFAULT_DEBOUNCE);
    input.cancel();
    assert!(matches!(input.phase(), DebouncePhase::Settled { .. }));
}

// ===== Initial value =====

#[test]
fn initial_value_is_already_settled() {
    let t0 = Instant::now();
    let mut input = SearchInput::new("from url", DEFAULT_DEBOUNCE);
    assert_eq!(input.text(), "from url");
    assert_eq!(input.cursor(), 8);
    assert_eq!(input.poll(t0 + ms(10_000)), None);
}

#[test]
fn empty_initial_value_is_idle() {
    assert_eq!(input().phase(), &DebouncePhase::Idle);
}

// ===== Editing =====

#[test]
fn backspace_at_start_is_not_an_edit() {
    let t0 = Instant::now();
    let mut input = input();
    assert_eq!(input.backspace(t0), None);
    assert!(!input.is_pending());
}

#[test]
fn delete_at_end_is_not_an_edit() {
    let t0 = Instant::now();
    let mut input = SearchInput::new("ab", DEFAULT_DEBOUNCE);
    assert_eq!(input.delete(t0), None);
    assert!(!input.is_pending());
}

#[test]
fn inserts_at_cursor_position() {
    let t0 = Instant::now();
    let mut input = SearchInput::new("ac", DEFAULT_DEBOUNCE);
    input.cursor_left();
    input.insert_char('b', t0);
    assert_eq!(input.text(), "abc");
    assert_eq!(input.cursor(), 2);
}

#[test]
fn delete_removes_character_under_cursor() {
    let t0 = Instant::now();
    let mut input = SearchInput::new("abc", DEFAULT_DEBOUNCE);
    input.home();
    assert_eq!(input.delete(t0), Some("bc"));
    assert_eq!(input.cursor(), 0);
}

#[test]
fn handles_multibyte_characters() {
    let t0 = Instant::now();
    let mut input = SearchInput::new("héllo", DEFAULT_DEBOUNCE);
    input.cursor_left();
    input.cursor_left();
    input.cursor_left();
    input.backspace(t0);
    assert_eq!(input.text(), "hllo");
    input.insert_char('ü', t0);
    assert_eq!(input.text(), "hüllo");
}

#[test]
fn cursor_movement_saturates() {
    let mut input = SearchInput::new("ab", DEFAULT_DEBOUNCE);
    input.cursor_right();
    assert_eq!(input.cursor(), 2);
    input.home();
    input.cursor_left();
    assert_eq!(input.cursor(), 0);
    input.end();
    assert_eq!(input.cursor(), 2);
}

#[test]
fn cursor_movement_does_not_restart_window() {
    let t0 = Instant::now();
    let mut input = input();
    input.insert_char('a', t0);
    input.cursor_left();
    assert_eq!(input.poll(t0 + ms(500)), Some("a".to_string()));
}

#[test]
fn clear_on_empty_is_not_an_edit() {
    let t0 = Instant::now();
    let mut input = input();
    assert_eq!(input.clear(t0), None);

    input.insert_char('a', t0);
    assert_eq!(input.clear(t0 + ms(10)), Some(""));
    assert_eq!(input.poll(t0 + ms(510)), Some(String::new()));
}
