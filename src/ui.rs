//! Ratatui view widgets: typing screen, results screen, history screen.
//! Pure renderers over engine state; no mutation happens here.

use chrono::Local;
use ratatui::{
    buffer::Buffer,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Paragraph, Widget, Wrap},
};
use time_humanize::HumanTime;
use unicode_width::UnicodeWidthStr;

use crate::compare::Verdict;
use crate::config::Mode;
use crate::history::ResultRecord;
use crate::session::Session;
use crate::theme::Palette;

const HORIZONTAL_MARGIN: u16 = 5;

pub const IDLE_HINT: &str = "start typing to begin; paste is disabled for fairness";
pub const PASTE_HINT: &str = "paste is disabled, please type the passage yourself";

/// The live test: timer, stats line, per-character target text, hint.
pub struct TypingView<'a> {
    pub session: &'a Session,
    pub hint: &'a str,
    pub palette: Palette,
}

impl TypingView<'_> {
    fn prompt_spans(&self) -> Vec<Span<'_>> {
        let palette = &self.palette;
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let correct = bold.fg(palette.correct);
        let incorrect = bold.fg(palette.incorrect);
        let pending = bold.fg(palette.dim).add_modifier(Modifier::DIM);

        let comparison = &self.session.comparison;
        self.session
            .target
            .chars()
            .zip(comparison.verdicts.iter())
            .enumerate()
            .map(|(idx, (c, verdict))| {
                let mut style = match verdict {
                    Verdict::Correct => correct,
                    Verdict::Incorrect => incorrect,
                    Verdict::Pending => pending,
                };
                if comparison.caret == Some(idx) {
                    style = style.add_modifier(Modifier::UNDERLINED);
                }
                let shown = match (verdict, c) {
                    // make a missed space visible
                    (Verdict::Incorrect, ' ') => "\u{b7}".to_string(),
                    _ => c.to_string(),
                };
                Span::styled(shown, style)
            })
            .collect()
    }

    fn stats_line(&self) -> String {
        let m = self.session.metrics();
        format!(
            "{} wpm   {}% acc   {} err   {}%",
            m.wpm_rounded(),
            m.accuracy_int(),
            m.errors,
            m.progress_int(),
        )
    }
}

impl Widget for TypingView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let dim_bold = bold.fg(self.palette.dim).add_modifier(Modifier::DIM);
        let italic = Style::default()
            .fg(self.palette.hint)
            .add_modifier(Modifier::ITALIC);

        let max_chars_per_line = area.width.saturating_sub(HORIZONTAL_MARGIN * 2).max(1);
        let mut prompt_lines =
            ((self.session.target.width() as f64 / max_chars_per_line as f64).ceil() + 1.0) as u16;
        if self.session.target.width() <= max_chars_per_line as usize {
            prompt_lines = 1;
        }

        let padding = (area.height.saturating_sub(prompt_lines + 4)) / 2;
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .horizontal_margin(HORIZONTAL_MARGIN)
            .constraints(
                [
                    Constraint::Length(padding),
                    Constraint::Length(1), // timer
                    Constraint::Length(1), // stats
                    Constraint::Length(prompt_lines),
                    Constraint::Length(1), // hint
                    Constraint::Min(0),
                ]
                .as_ref(),
            )
            .split(area);

        let timer = Paragraph::new(Span::styled(self.session.timer_display(), dim_bold))
            .alignment(Alignment::Center);
        timer.render(chunks[1], buf);

        let stats = Paragraph::new(Span::styled(self.stats_line(), bold.fg(self.palette.fg)))
            .alignment(Alignment::Center);
        stats.render(chunks[2], buf);

        let prompt = Paragraph::new(Line::from(self.prompt_spans()))
            .alignment(if prompt_lines == 1 {
                Alignment::Center
            } else {
                Alignment::Left
            })
            .wrap(Wrap { trim: true });
        prompt.render(chunks[3], buf);

        let hint = Paragraph::new(Span::styled(self.hint, italic)).alignment(Alignment::Center);
        hint.render(chunks[4], buf);
    }
}

/// Final snapshot of a finished session.
pub struct ResultsView<'a> {
    pub record: &'a ResultRecord,
    pub palette: Palette,
}

impl Widget for ResultsView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold = Style::default()
            .fg(self.palette.fg)
            .add_modifier(Modifier::BOLD);
        let accent = Style::default().fg(self.palette.accent);
        let italic = Style::default().add_modifier(Modifier::ITALIC);

        let rec = self.record;
        let session_desc = match rec.mode {
            Mode::Timed => format!("{} / {} / {}s", rec.mode, rec.difficulty, rec.duration_seconds),
            Mode::Words => format!("{} / {} / {} words", rec.mode, rec.difficulty, rec.word_target),
        };

        let lines = vec![
            Line::from(Span::styled(
                format!("{} wpm   {}% acc", rec.wpm, rec.accuracy),
                bold,
            )),
            Line::from(Span::styled(
                format!(
                    "{} errors   {}s elapsed   {} chars",
                    rec.errors, rec.time_sec, rec.chars
                ),
                accent,
            )),
            Line::from(Span::styled(session_desc, accent)),
            Line::from(""),
            Line::from(Span::styled(
                "(r)etry / (n)ew text / (h)istory / (t)heme / (esc)ape",
                italic,
            )),
        ];

        centered_lines(lines, area, buf);
    }
}

/// Recent results, newest first.
pub struct HistoryView<'a> {
    pub records: &'a [ResultRecord],
    pub palette: Palette,
}

impl Widget for HistoryView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let bold = Style::default()
            .fg(self.palette.fg)
            .add_modifier(Modifier::BOLD);
        let dim = Style::default().fg(self.palette.dim);
        let italic = Style::default().add_modifier(Modifier::ITALIC);

        let mut lines = vec![Line::from(Span::styled("recent results", bold)), Line::from("")];

        if self.records.is_empty() {
            lines.push(Line::from(Span::styled(
                "no history yet; complete a test to see results here",
                dim,
            )));
        } else {
            for rec in self.records {
                let scope = match rec.mode {
                    Mode::Timed => format!("{}s", rec.duration_seconds),
                    Mode::Words => format!("{}w", rec.word_target),
                };
                let ago = HumanTime::from(-(Local::now() - rec.date).num_seconds());
                lines.push(Line::from(vec![
                    Span::styled(format!("{:>3} wpm  {:>3}%  ", rec.wpm, rec.accuracy), bold),
                    Span::styled(
                        format!(
                            "{} {} {}  {} err  {}s  {} chars  {}",
                            rec.mode, rec.difficulty, scope, rec.errors, rec.time_sec, rec.chars, ago
                        ),
                        dim,
                    ),
                ]));
            }
        }

        lines.push(Line::from(""));
        lines.push(Line::from(Span::styled(
            "(c)lear history / (b)ack / (esc)ape",
            italic,
        )));

        centered_lines(lines, area, buf);
    }
}

fn centered_lines(lines: Vec<Line>, area: Rect, buf: &mut Buffer) {
    let height = lines.len() as u16;
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .horizontal_margin(HORIZONTAL_MARGIN)
        .constraints(
            [
                Constraint::Length(area.height.saturating_sub(height) / 2),
                Constraint::Length(height),
                Constraint::Min(0),
            ]
            .as_ref(),
        )
        .split(area);

    Paragraph::new(lines)
        .alignment(Alignment::Center)
        .wrap(Wrap { trim: true })
        .render(chunks[1], buf);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Difficulty, SessionConfig};
    use crate::theme::Theme;

    fn buffer_text(buf: &Buffer) -> String {
        buf.content().iter().map(|c| c.symbol()).collect()
    }

    fn render<W: Widget>(widget: W) -> String {
        let area = Rect::new(0, 0, 80, 24);
        let mut buf = Buffer::empty(area);
        widget.render(area, &mut buf);
        buffer_text(&buf)
    }

    fn sample_record() -> ResultRecord {
        ResultRecord {
            date: Local::now(),
            mode: Mode::Timed,
            difficulty: Difficulty::Medium,
            duration_seconds: 60,
            word_target: 25,
            wpm: 42,
            accuracy: 95,
            errors: 3,
            time_sec: 60,
            chars: 210,
        }
    }

    #[test]
    fn typing_view_shows_target_and_timer() {
        let session = Session::new(SessionConfig::default(), "hello world".into());
        let rendered = render(TypingView {
            session: &session,
            hint: IDLE_HINT,
            palette: Theme::Dark.palette(),
        });
        assert!(rendered.contains("hello world"));
        assert!(rendered.contains("01:00"));
        assert!(rendered.contains("100% acc"));
        assert!(rendered.contains(IDLE_HINT));
    }

    #[test]
    fn typing_view_marks_missed_space() {
        let mut session = Session::new(SessionConfig::default(), "a b".into());
        session.on_input("axb".into());
        let rendered = render(TypingView {
            session: &session,
            hint: "",
            palette: Theme::Light.palette(),
        });
        assert!(rendered.contains('\u{b7}'));
    }

    #[test]
    fn typing_view_survives_tiny_area() {
        let session = Session::new(SessionConfig::default(), "hello".into());
        let area = Rect::new(0, 0, 12, 3);
        let mut buf = Buffer::empty(area);
        TypingView {
            session: &session,
            hint: "",
            palette: Theme::Dark.palette(),
        }
        .render(area, &mut buf);
        assert_eq!(*buf.area(), area);
    }

    #[test]
    fn results_view_shows_final_numbers() {
        let record = sample_record();
        let rendered = render(ResultsView {
            record: &record,
            palette: Theme::Dark.palette(),
        });
        assert!(rendered.contains("42 wpm"));
        assert!(rendered.contains("95% acc"));
        assert!(rendered.contains("3 errors"));
        assert!(rendered.contains("timed / medium / 60s"));
        assert!(rendered.contains("(r)etry"));
    }

    #[test]
    fn history_view_lists_records_newest_first() {
        let mut newest = sample_record();
        newest.wpm = 77;
        let records = vec![newest, sample_record()];
        let rendered = render(HistoryView {
            records: &records,
            palette: Theme::Dark.palette(),
        });
        let first = rendered.find("77 wpm").expect("newest record shown");
        let second = rendered.find("42 wpm").expect("older record shown");
        assert!(first < second);
        assert!(rendered.contains("(c)lear"));
    }

    #[test]
    fn history_view_handles_empty_history() {
        let rendered = render(HistoryView {
            records: &[],
            palette: Theme::Light.palette(),
        });
        assert!(rendered.contains("no history yet"));
    }
}
