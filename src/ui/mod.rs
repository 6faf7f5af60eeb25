pub mod field;
pub mod overlay;

use ratatui::prelude::*;
use ratatui::widgets::*;

use invaders::engine::snapshot::Snapshot;
use invaders::engine::Phase;

use crate::app::App;

pub fn render(frame: &mut Frame, app: &App) {
    let snap = app.engine.snapshot();

    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Rounded)
        .border_style(Style::default().fg(Color::Rgb(160, 80, 255)))
        .title(" \u{1f47e} Space Invaders ")
        .title_style(Style::default().fg(Color::Rgb(200, 120, 255)).add_modifier(Modifier::BOLD));
    let inner = block.inner(frame.area());
    frame.render_widget(block, frame.area());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(1), // Status bar
            Constraint::Min(8),    // Playfield
            Constraint::Length(1), // Help
        ])
        .split(inner);

    frame.render_widget(Paragraph::new(status_line(&snap)), chunks[0]);

    let fw = chunks[1].width as usize;
    let fh = chunks[1].height as usize;
    if fw > 0 && fh > 0 {
        let lines = field::render_field(&snap, fw, fh);
        frame.render_widget(Paragraph::new(lines), chunks[1]);
    }

    frame.render_widget(Paragraph::new(help_line(snap.phase)), chunks[2]);

    match snap.phase {
        Phase::Menu => overlay::render_menu(frame, chunks[1]),
        Phase::GameOver => overlay::render_game_over(frame, chunks[1], &snap, app.engine.ending()),
        Phase::Playing => {}
    }
}

fn status_line(snap: &Snapshot) -> Line<'static> {
    let lives_str = "\u{2665} ".repeat(snap.lives as usize);
    Line::from(vec![
        Span::styled(" SCORE: ", Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("{:06} ", snap.score),
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled("LIVES: ", Style::default().fg(Color::Yellow)),
        Span::styled(
            format!("{:<6}", lives_str),
            Style::default().fg(Color::Red).add_modifier(Modifier::BOLD),
        ),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled("LEVEL: ", Style::default().fg(Color::Yellow)),
        Span::styled(format!("{} ", snap.level), Style::default().fg(Color::Cyan)),
        Span::styled(" | ", Style::default().fg(Color::DarkGray)),
        Span::styled(
            format!("Invaders: {} ", snap.enemies.len()),
            Style::default().fg(Color::Rgb(255, 80, 80)),
        ),
    ])
}

fn help_line(phase: Phase) -> Line<'static> {
    let sep = || Span::styled("| ", Style::default().fg(Color::Rgb(60, 60, 60)));
    match phase {
        Phase::Playing => Line::from(vec![
            Span::styled(" \u{2190}\u{2192}/A D Move ", Style::default().fg(Color::DarkGray)),
            sep(),
            Span::styled("Space Shoot ", Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD)),
            sep(),
            Span::styled("Q/Esc Quit", Style::default().fg(Color::DarkGray)),
        ]),
        Phase::Menu | Phase::GameOver => Line::from(vec![
            Span::styled(" Enter Start ", Style::default().fg(Color::Green).add_modifier(Modifier::BOLD)),
            sep(),
            Span::styled("Q/Esc Quit", Style::default().fg(Color::DarkGray)),
        ]),
    }
}
