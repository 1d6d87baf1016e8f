use super::Scroll;

#[test]
fn it_does_not_scroll_short_content() {
    let mut scroll = Scroll::default();
    scroll.set_state(5, 20);
    scroll.down();
    scroll.down_page();

    assert_eq!(scroll.position, 0);
}

#[test]
fn it_clamps_to_the_last_page() {
    let mut scroll = Scroll::default();
    scroll.set_state(25, 10);
    scroll.down_page();
    scroll.down_page();

    assert_eq!(scroll.position, 15);

    scroll.up();
    assert_eq!(scroll.position, 14);
}

#[test]
fn it_resets_to_top() {
    let mut scroll = Scroll::default();
    scroll.set_state(40, 10);
    scroll.down_page();
    scroll.top();

    assert_eq!(scroll.position, 0);
}

#[test]
fn it_clamps_when_content_shrinks() {
    let mut scroll = Scroll::default();
    scroll.set_state(40, 10);
    scroll.down_page();
    scroll.down_page();
    scroll.set_state(12, 10);

    assert_eq!(scroll.position, 2);
}
