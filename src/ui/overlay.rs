use ratatui::prelude::*;
use ratatui::widgets::*;

use invaders::engine::entities::Rank;
use invaders::engine::snapshot::Snapshot;
use invaders::engine::Ending;

use super::field::rank_color;

const BANNER: [&str; 3] = [
    "\u{2584}\u{2580}\u{2580} \u{2588}\u{2580}\u{2588} \u{2584}\u{2580}\u{2584} \u{2584}\u{2580}\u{2580} \u{2588}\u{2580}\u{2580}",
    " \u{2580}\u{2584} \u{2588}\u{2580}\u{2580} \u{2588}\u{2580}\u{2588} \u{2588}   \u{2588}\u{2580}\u{2580}",
    "\u{2580}\u{2580}  \u{2580}   \u{2580} \u{2580}  \u{2580}\u{2580} \u{2580}\u{2580}\u{2580}",
];

fn centered(area: Rect, w: u16, h: u16) -> Rect {
    let w = w.min(area.width.saturating_sub(2));
    let h = h.min(area.height.saturating_sub(2));
    let x = area.x + area.width.saturating_sub(w) / 2;
    let y = area.y + area.height.saturating_sub(h) / 2;
    Rect::new(x, y, w, h)
}

fn panel(frame: &mut Frame, area: Rect, title: &'static str, color: Color) -> Rect {
    frame.render_widget(Clear, area);
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(color))
        .title(title)
        .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
        .style(Style::default().bg(Color::Rgb(15, 15, 25)));
    let inner = block.inner(area);
    frame.render_widget(block, area);
    inner
}

fn score_table() -> Vec<Line<'static>> {
    [Rank::Top, Rank::Mid, Rank::Bottom]
        .into_iter()
        .map(|rank| {
            Line::from(vec![
                Span::styled("\u{25c6} ", Style::default().fg(rank_color(rank))),
                Span::styled(
                    format!("= {} pts", rank.points()),
                    Style::default().fg(Color::Rgb(180, 180, 200)),
                ),
            ])
        })
        .collect()
}

pub fn render_menu(frame: &mut Frame, area: Rect) {
    let inner = panel(frame, centered(area, 40, 15), " INVADERS ", Color::Rgb(80, 255, 120));

    let mut lines: Vec<Line> = BANNER
        .iter()
        .map(|row| Line::styled(*row, Style::default().fg(Color::Rgb(80, 200, 255)).add_modifier(Modifier::BOLD)))
        .collect();
    lines.push(Line::from(""));
    lines.push(Line::styled(
        "Press ENTER to Start",
        Style::default().fg(Color::Rgb(80, 255, 120)).add_modifier(Modifier::BOLD),
    ));
    lines.push(Line::from(""));
    lines.push(Line::styled("\u{2190} \u{2192} or A/D to move", Style::default().fg(Color::Gray)));
    lines.push(Line::styled("SPACE to shoot", Style::default().fg(Color::Gray)));
    lines.push(Line::from(""));
    lines.extend(score_table());

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}

pub fn render_game_over(frame: &mut Frame, area: Rect, snap: &Snapshot, ending: Option<Ending>) {
    let inner = panel(frame, centered(area, 40, 10), " GAME OVER ", Color::Rgb(255, 80, 80));

    let cause = match ending {
        Some(Ending::Invaded) => "The invaders have landed!",
        Some(Ending::LivesExhausted) | None => "Your last ship is gone.",
    };
    let lines = vec![
        Line::from(""),
        Line::styled(cause, Style::default().fg(Color::Rgb(255, 120, 120)).add_modifier(Modifier::BOLD)),
        Line::from(""),
        Line::styled(
            format!("Final Score: {}", snap.score),
            Style::default().fg(Color::Rgb(255, 215, 0)).add_modifier(Modifier::BOLD),
        ),
        Line::styled(format!("Reached level {}", snap.level), Style::default().fg(Color::Cyan)),
        Line::from(""),
        Line::styled(
            "Press ENTER to Play Again",
            Style::default().fg(Color::Rgb(80, 255, 120)).add_modifier(Modifier::SLOW_BLINK),
        ),
    ];

    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), inner);
}
