use crate::core::state::App;
use crate::tui::component::Component;
use crate::tui::components::{MessageList, Prompt, TitleBar};
use crate::tui::theme;
use crate::tui::{InputMode, TuiState};

use ratatui::Frame;
use ratatui::layout::{Constraint, Layout, Rect};
use ratatui::widgets::{Block, BorderType};

/// Screen regions inside the CRT bezel.
pub struct ScreenAreas {
    pub title: Rect,
    pub log: Rect,
    pub input: Rect,
}

pub fn screen_areas(area: Rect) -> (Block<'static>, ScreenAreas) {
    use Constraint::{Length, Min};

    let bezel = Block::bordered()
        .border_type(BorderType::Rounded)
        .border_style(theme::border())
        .style(theme::base());
    let inner = bezel.inner(area);
    let [title, log, input] = Layout::vertical([Length(1), Min(0), Length(1)]).areas(inner);

    (bezel, ScreenAreas { title, log, input })
}

pub fn draw_ui(frame: &mut Frame, app: &App, tui: &mut TuiState) {
    let (bezel, areas) = screen_areas(frame.area());
    frame.render_widget(bezel, frame.area());

    let log_focused = tui.input_mode == InputMode::Log;

    TitleBar::new(
        app.session_url().map(str::to_string),
        app.session_state(),
        log_focused,
    )
    .render(frame, areas.title);

    MessageList::new(&mut tui.message_list, &app.log).render(frame, areas.log);

    tui.input_box.prompt = Prompt::from_flags(app.show_url_input, app.connected);
    tui.input_box.focused = !log_focused;
    tui.input_box.render(frame, areas.input);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::action::{Action, update};
    use crate::test_support::test_app;
    use crate::transport::TransportEvent;
    use ratatui::Terminal;
    use ratatui::backend::TestBackend;

    fn screen(app: &App, tui: &mut TuiState) -> String {
        let mut terminal = Terminal::new(TestBackend::new(60, 16)).unwrap();
        terminal.draw(|f| draw_ui(f, app, tui)).unwrap();
        terminal
            .backend()
            .buffer()
            .content()
            .iter()
            .map(|c| c.symbol())
            .collect()
    }

    #[test]
    fn test_screen_areas_stack_inside_bezel() {
        let (_, areas) = screen_areas(Rect::new(0, 0, 40, 12));
        assert_eq!(areas.title, Rect::new(1, 1, 38, 1));
        assert_eq!(areas.log, Rect::new(1, 2, 38, 8));
        assert_eq!(areas.input, Rect::new(1, 10, 38, 1));
    }

    #[test]
    fn test_draw_boot_screen() {
        let (app, _, _rx) = test_app();
        let mut tui = TuiState::new("ws://localhost:8001/ws");
        let text = screen(&app, &mut tui);

        assert!(text.contains("CRTCHAT | OFFLINE"));
        assert!(text.contains("DEBUG ROM V0.3"));
        assert!(text.contains("CONNECT TO: ws://localhost:8001/ws"));
    }

    #[test]
    fn test_draw_switches_prompt_when_open() {
        let (mut app, _, _rx) = test_app();
        let mut tui = TuiState::new("ws://localhost:8001/ws");
        update(&mut app, Action::Submit("ws://x".to_string()));
        update(
            &mut app,
            Action::Transport {
                connection: 1,
                event: TransportEvent::Opened,
            },
        );

        let text = screen(&app, &mut tui);
        assert!(text.contains("ws://x | ONLINE"));
        assert!(text.contains("MONITOR READY."));
        assert!(!text.contains("CONNECT TO:"));
        assert_eq!(tui.input_box.prompt, Prompt::Composer);
    }
}
