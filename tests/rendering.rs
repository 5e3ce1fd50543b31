use ratatui::layout::Rect;
use ratatui::{Terminal, backend::TestBackend};
use tui_marquee::internal::models::Testimonial;
use tui_marquee::internal::ui::card::TestimonialCard;
use tui_marquee::utils::avatar::AvatarArt;
use tui_marquee::utils::theme_loader::TuiTheme;

fn sample(rating: Option<i8>, avatar: Option<&str>) -> Testimonial {
    Testimonial {
        avatar: avatar.map(str::to_string),
        name: "Sarah M.".to_string(),
        role: Some("Atlanta, GA".to_string()),
        quote: "Best braiding experience ever! The attention to detail is incredible and then some, far beyond what fits on a card.".to_string(),
        rating,
    }
}

fn render_card(item: &Testimonial, art: &AvatarArt, area: Rect) -> ratatui::buffer::Buffer {
    let backend = TestBackend::new(area.width + 4, area.height + 2);
    let mut terminal = Terminal::new(backend).unwrap();
    let theme = TuiTheme::default();

    terminal
        .draw(|f| {
            f.render_widget(
                TestimonialCard {
                    item,
                    avatar: art,
                    theme: &theme,
                    dimmed: false,
                },
                area,
            );
        })
        .unwrap();

    terminal.backend().buffer().clone()
}

fn row_text(buf: &ratatui::buffer::Buffer, y: u16) -> String {
    (0..buf.area.width)
        .filter_map(|x| buf.cell((x, y)).map(|c| c.symbol().to_string()))
        .collect()
}

fn count_symbol(buf: &ratatui::buffer::Buffer, symbol: &str) -> usize {
    let mut count = 0;
    for y in 0..buf.area.height {
        for x in 0..buf.area.width {
            if let Some(cell) = buf.cell((x, y))
                && cell.symbol() == symbol
            {
                count += 1;
            }
        }
    }
    count
}

#[test]
fn card_renders_exactly_five_stars() {
    let area = Rect::new(0, 0, 32, 10);
    for rating in [None, Some(-2), Some(0), Some(3), Some(5), Some(9)] {
        let item = sample(rating, None);
        let buf = render_card(&item, &AvatarArt::Initials(item.initials()), area);
        assert_eq!(count_symbol(&buf, "★"), 5, "rating {rating:?}");
    }
}

#[test]
fn card_shows_name_role_and_initials_badge() {
    let area = Rect::new(0, 0, 32, 10);
    let item = sample(Some(5), None);
    let buf = render_card(&item, &AvatarArt::Initials(item.initials()), area);

    let header = row_text(&buf, 1);
    assert!(header.contains("Sarah M."));
    assert!(row_text(&buf, 2).contains("Atlanta, GA"));
    assert!(header.contains("SM") || row_text(&buf, 2).contains("SM"));
}

#[test]
fn avatar_fallback_keeps_the_bounding_box_fixed() {
    let area = Rect::new(0, 0, 32, 10);
    let with_badge = render_card(
        &sample(Some(5), Some("assets/broken/missing.png")),
        &AvatarArt::Initials("SM".to_string()),
        area,
    );
    let with_image = render_card(
        &sample(Some(5), None),
        &AvatarArt::Image(vec![
            vec![
                (
                    ratatui::style::Color::Rgb(200, 40, 120),
                    ratatui::style::Color::Rgb(180, 30, 110)
                );
                6
            ];
            3
        ]),
        area,
    );

    // Same rounded corners in the same places either way.
    for buf in [&with_badge, &with_image] {
        assert_eq!(buf.cell((0, 0)).unwrap().symbol(), "╭");
        assert_eq!(buf.cell((31, 0)).unwrap().symbol(), "╮");
        assert_eq!(buf.cell((0, 9)).unwrap().symbol(), "╰");
        assert_eq!(buf.cell((31, 9)).unwrap().symbol(), "╯");
    }
}

#[test]
fn long_quotes_clip_inside_the_card() {
    let area = Rect::new(0, 0, 32, 10);
    let mut item = sample(Some(5), None);
    item.quote = "word ".repeat(200);
    let buf = render_card(&item, &AvatarArt::Initials("SM".to_string()), area);

    // Nothing may leak below the card's bottom border.
    for y in area.height..buf.area.height {
        let text = row_text(&buf, y);
        assert!(text.trim().is_empty(), "row {y} leaked: {text:?}");
    }
}

#[test]
fn tiny_areas_render_nothing_rather_than_panicking() {
    let item = sample(Some(4), None);
    let buf = render_card(
        &item,
        &AvatarArt::Initials("SM".to_string()),
        Rect::new(0, 0, 8, 3),
    );
    assert_eq!(count_symbol(&buf, "★"), 0);
}
