use std::collections::VecDeque;
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use tui::{
    backend::Backend,
    layout::Rect,
    style::{Color, Style},
    text::{Span, Spans},
    widgets::{Block, Borders, Clear, Paragraph, Wrap},
    Frame,
};

const MAX_VISIBLE: usize = 3;
const TOAST_WIDTH: u16 = 48;
const TOAST_HEIGHT: u16 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

impl ToastLevel {
    fn title(self) -> &'static str {
        match self {
            ToastLevel::Info => "Info",
            ToastLevel::Success => "Done",
            ToastLevel::Error => "Error",
        }
    }

    fn color(self) -> Color {
        match self {
            ToastLevel::Info => Color::Cyan,
            ToastLevel::Success => Color::Green,
            ToastLevel::Error => Color::Red,
        }
    }
}

#[derive(Debug, Clone)]
pub struct Toast {
    pub level: ToastLevel,
    pub message: String,
    pub created_at: DateTime<Local>,
    expires_at: Instant,
}

/// Transient notifications shown over whatever screen is active.
pub struct Toaster {
    lifetime: Duration,
    toasts: VecDeque<Toast>,
}

impl Toaster {
    pub fn new(lifetime: Duration) -> Self {
        Self {
            lifetime,
            toasts: VecDeque::new(),
        }
    }

    pub fn info(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Info, message.into());
    }

    pub fn success(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Success, message.into());
    }

    pub fn error(&mut self, message: impl Into<String>) {
        self.push(ToastLevel::Error, message.into());
    }

    fn push(&mut self, level: ToastLevel, message: String) {
        self.toasts.push_front(Toast {
            level,
            message,
            created_at: Local::now(),
            expires_at: Instant::now() + self.lifetime,
        });
    }

    /// Drop every toast that has expired at `now`.
    pub fn prune(&mut self, now: Instant) {
        self.toasts.retain(|toast| toast.expires_at > now);
    }

    /// Newest first, at most three.
    pub fn visible(&self) -> impl Iterator<Item = &Toast> {
        self.toasts.iter().take(MAX_VISIBLE)
    }

    pub fn latest(&self) -> Option<&Toast> {
        self.toasts.front()
    }

    pub fn len(&self) -> usize {
        self.toasts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.toasts.is_empty()
    }
}

/// Stack toasts in the top right corner of `area`.
pub fn render_toasts<B: Backend>(frame: &mut Frame<B>, toaster: &Toaster, area: Rect) {
    let width = TOAST_WIDTH.min(area.width);
    let x = area.x + area.width.saturating_sub(width);

    for (i, toast) in toaster.visible().enumerate() {
        let y = area.y + 1 + i as u16 * TOAST_HEIGHT;
        if y + TOAST_HEIGHT > area.y + area.height {
            break;
        }
        let toast_area = Rect::new(x, y, width, TOAST_HEIGHT);

        let title = format!("{} {}", toast.level.title(), toast.created_at.format("%H:%M:%S"));
        let body = Paragraph::new(Spans::from(Span::raw(toast.message.clone())))
            .wrap(Wrap { trim: true })
            .block(
                Block::default()
                    .title(title)
                    .borders(Borders::ALL)
                    .border_style(Style::default().fg(toast.level.color())),
            );

        frame.render_widget(Clear, toast_area);
        frame.render_widget(body, toast_area);
    }
}
