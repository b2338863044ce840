use tui_minesweeper::term::FramePacer;

#[test]
fn frame_pacer_sleeps_remainder_of_interval() {
    let mut p = FramePacer::new(100, 0);
    assert_eq!(p.next_delay(30), 70);
    assert_eq!(p.next_delay(130), 70);
    assert_eq!(p.next_delay(200), 100);
}

#[test]
fn frame_pacer_never_goes_negative() {
    let mut p = FramePacer::new(100, 0);
    assert_eq!(p.next_delay(250), 0);
}

#[test]
fn frame_pacer_does_not_burst_after_overrun() {
    let mut p = FramePacer::new(100, 0);
    assert_eq!(p.next_delay(250), 0);
    // The schedule restarts at 250 instead of catching up on 200 and 300.
    assert_eq!(p.next_delay(260), 90);
}

#[test]
fn frame_pacer_keeps_cadence_without_drift() {
    let mut p = FramePacer::new(50, 1_000);
    let mut now = 1_000;
    for _ in 0..10 {
        now += 7;
        let delay = p.next_delay(now);
        assert_eq!(delay, 43);
        now += delay;
    }
    assert_eq!(now, 1_500);
}
