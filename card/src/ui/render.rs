//! Render orchestration for the card TUI

use ratatui::{
    layout::{Alignment, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame,
};

use card_core::{BirthdayContent, GeneratedImage, Hunt, Phase};

use crate::app::App;
use crate::ui::layout::{centered_rect_fixed, HuntLayout, RevealLayout};
use crate::ui::widgets::SpiritFieldWidget;

const SPINNER_FRAMES: [&str; 10] = ["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

/// Main render function
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    match app.experience.phase() {
        Phase::Intro => render_intro(frame, app, area),
        Phase::Hunting(hunt) => render_hunting(frame, app, hunt, area),
        Phase::Generating => render_generating(frame, app, area),
        Phase::Reveal { content, artwork } => render_reveal(frame, app, content, artwork, area),
        Phase::Error { message } => render_error(frame, app, message, area),
    }

    render_status_line(frame, app, area);
}

fn render_intro(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let lines = vec![
        Line::from(Span::styled(
            "DETECTANDO ANIVERSARIANTE",
            theme.spirit_style().add_modifier(Modifier::DIM),
        )),
        Line::default(),
        Line::from(Span::styled("O  O R Á C U L O  D E", theme.title_style())),
        Line::from(Span::styled(
            "E D U A R D A",
            theme.title_style().add_modifier(Modifier::ITALIC),
        )),
        Line::default(),
        Line::from(Span::styled(
            "O véu entre os mundos está fino hoje.",
            theme.dim_style(),
        )),
        Line::from(Span::styled(
            "Uma fusão de energias ocultas e beleza clássica aguarda.",
            theme.dim_style(),
        )),
        Line::default(),
        Line::from(vec![
            Span::styled("[ Enter ] ", theme.spirit_style()),
            Span::raw("Iniciar Sincronização"),
        ]),
    ];

    let popup = centered_rect_fixed(60, lines.len() as u16, area);
    frame.render_widget(
        Paragraph::new(lines).alignment(Alignment::Center),
        popup,
    );
}

fn render_hunting(frame: &mut Frame, app: &App, hunt: &Hunt, area: Rect) {
    let theme = &app.theme;
    let layout = HuntLayout::calculate(area);

    let header = Paragraph::new(Line::from(vec![
        Span::raw("Colete os fragmentos espirituais: "),
        Span::styled(
            format!("{} / {}", hunt.caught(), hunt.total()),
            theme.spirit_style().add_modifier(Modifier::BOLD),
        ),
    ]))
    .alignment(Alignment::Center)
    .block(Block::default().borders(Borders::BOTTOM).border_style(theme.border_style()));
    frame.render_widget(header, layout.header);

    frame.render_widget(
        SpiritFieldWidget::new(hunt.spirits(), theme).frame(app.animation_frame),
        layout.field,
    );

    let footer = Paragraph::new(Span::styled(
        "Clique nos orbes (ou teclas 1-5) para selar a energia",
        theme.dim_style(),
    ))
    .alignment(Alignment::Center);
    frame.render_widget(footer, layout.footer);
}

fn render_generating(frame: &mut Frame, app: &App, area: Rect) {
    let theme = &app.theme;
    let spinner = SPINNER_FRAMES[app.animation_frame as usize % SPINNER_FRAMES.len()];

    let lines = vec![
        Line::from(Span::styled(spinner, theme.spirit_style())),
        Line::default(),
        Line::from(Span::styled(
            "INVOCANDO A TURBO GRANNY E ESCULPINDO O DESTINO...",
            theme.dim_style(),
        )),
    ];

    let popup = centered_rect_fixed(60, lines.len() as u16, area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), popup);
}

fn render_reveal(
    frame: &mut Frame,
    app: &App,
    content: &BirthdayContent,
    _artwork: &GeneratedImage,
    area: Rect,
) {
    let theme = &app.theme;
    let layout = RevealLayout::calculate(area);

    let title = Paragraph::new(vec![
        Line::default(),
        Line::from(Span::styled(content.title.as_str(), theme.title_style())),
    ])
    .alignment(Alignment::Center);
    frame.render_widget(title, layout.title);

    let message = Paragraph::new(content.message.as_str())
        .wrap(Wrap { trim: false })
        .alignment(Alignment::Center);
    frame.render_widget(message, layout.message);

    let poem_text = format!(
        "\"{}\" O poema foi gerado por IA, mas é porque eu não conheço palavras \
         pra expressar os sentimentos que você traz",
        content.poem
    );
    let poem = Paragraph::new(Span::styled(
        poem_text,
        theme.dim_style().add_modifier(Modifier::ITALIC),
    ))
    .wrap(Wrap { trim: true })
    .alignment(Alignment::Center)
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(theme.border_style())
            .title(Span::styled(" Profecia ", theme.title_style())),
    );
    frame.render_widget(poem, layout.poem);

    let mut footer_spans = vec![Span::styled("ID: BIRTHDAY_PROTOCOL_2025", theme.dim_style())];
    if let Some(path) = app.artwork_path() {
        footer_spans.push(Span::raw("  •  "));
        footer_spans.push(Span::styled(
            format!("arte: {}", path.display()),
            theme.spirit_style(),
        ));
    }
    footer_spans.push(Span::raw("  •  "));
    footer_spans.push(Span::styled("[ Enter ] ", theme.spirit_style()));
    footer_spans.push(Span::raw("Reiniciar Ritual"));

    let footer = Paragraph::new(Line::from(footer_spans)).alignment(Alignment::Center);
    frame.render_widget(footer, layout.footer);
}

fn render_error(frame: &mut Frame, app: &App, message: &str, area: Rect) {
    let theme = &app.theme;
    let lines = vec![
        Line::from(Span::styled("⚠", theme.error_style())),
        Line::default(),
        Line::from(Span::styled(message, theme.dim_style())),
        Line::default(),
        Line::from(vec![
            Span::styled("[ Enter ] ", theme.spirit_style()),
            Span::raw("Tentar Novamente"),
        ]),
    ];

    let popup = centered_rect_fixed(60, lines.len() as u16, area);
    frame.render_widget(Paragraph::new(lines).alignment(Alignment::Center), popup);
}

fn render_status_line(frame: &mut Frame, app: &App, area: Rect) {
    let Some(status) = app.status_message() else {
        return;
    };
    if area.height < 2 {
        return;
    }

    let line = Rect::new(area.x, area.bottom() - 1, area.width, 1);
    let status = Paragraph::new(Span::styled(status, app.theme.dim_style()));
    frame.render_widget(status, line);
}
