//! Key event handling

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use crate::model::ActiveSection;
use super::AppController;

impl AppController {
    pub async fn handle_key_event(&self, key: KeyEvent) -> Result<()> {
        if key.kind != KeyEventKind::Press {
            return Ok(());
        }

        let model = self.model.lock().await;

        // Handle error message first (blocks all other interactions)
        if model.has_error().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Enter => {
                    model.clear_error().await;
                    Ok(())
                }
                _ => Ok(()),
            }
        }

        // Handle help popup
        if model.is_help_popup_open().await {
            return match key.code {
                KeyCode::Esc | KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
                    model.hide_help_popup().await;
                    Ok(())
                }
                _ => Ok(()),
            }
        }

        // Copy-link menu is modal
        if model.get_copy_menu().await.is_some() {
            return match key.code {
                KeyCode::Enter | KeyCode::Char('c') | KeyCode::Char('C') => {
                    drop(model);
                    self.copy_menu_link().await;
                    Ok(())
                }
                KeyCode::Esc | KeyCode::Char('m') | KeyCode::Char('M') => {
                    model.close_copy_menu().await;
                    Ok(())
                }
                _ => Ok(()),
            }
        }

        if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
            model.set_should_quit(true).await;
            return Ok(());
        }

        let ui_state = model.get_ui_state().await;

        // Typed input goes to the publish card while it is focused
        if ui_state.active_section == ActiveSection::Publish {
            match key.code {
                KeyCode::Tab | KeyCode::BackTab => {
                    model.cycle_section().await;
                }
                KeyCode::Esc => {
                    model.set_active_section(ActiveSection::Feed).await;
                }
                KeyCode::Up | KeyCode::Down => {
                    model.toggle_publish_field().await;
                }
                KeyCode::Enter => {
                    drop(model);
                    self.choose_publish_file().await;
                }
                KeyCode::Backspace => {
                    model.backspace_publish().await;
                }
                KeyCode::Char('x') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                    model.clear_publish().await;
                    model.set_status("Publish form cleared").await;
                }
                KeyCode::Char(c) => {
                    if model.get_publish_draft().await.is_disabled() {
                        model.set_status("Publishing needs a positive balance").await;
                    } else {
                        model.append_to_publish(c).await;
                    }
                }
                _ => {}
            }
            return Ok(());
        }

        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                model.set_should_quit(true).await;
            }
            KeyCode::Tab | KeyCode::BackTab => {
                model.cycle_section().await;
            }
            KeyCode::Up | KeyCode::Char('k') => {
                model.content_move_up().await;
            }
            KeyCode::Down | KeyCode::Char('j') => {
                model.content_move_down().await;
            }
            // Primary activation
            KeyCode::Enter => {
                drop(model);
                self.activate_selected().await;
            }
            // Secondary activation (context menu)
            KeyCode::Char('m') | KeyCode::Char('M') => {
                drop(model);
                self.open_context_menu().await;
            }
            KeyCode::Backspace | KeyCode::Esc => {
                drop(model);
                self.navigate_back().await;
            }
            KeyCode::Char('s') | KeyCode::Char('S') => {
                drop(model);
                self.toggle_selected_subscription().await;
            }
            KeyCode::Char('r') | KeyCode::Char('R') => {
                drop(model);
                self.refresh_selected().await;
            }
            KeyCode::Char('e') | KeyCode::Char('E') => {
                drop(model);
                self.edit_selected().await;
            }
            KeyCode::PageDown | KeyCode::Char(']') | KeyCode::PageUp | KeyCode::Char('[') => {
                if model.is_page_open().await {
                    return Ok(());
                }
                drop(model);
                let forward = matches!(key.code, KeyCode::PageDown | KeyCode::Char(']'));
                self.turn_feed_page(forward).await;
            }
            KeyCode::Char('v') | KeyCode::Char('V') => {
                let mode = model.cycle_display_mode().await;
                model.set_status(format!("Display: {}", mode.label())).await;
            }
            KeyCode::Char('n') | KeyCode::Char('N') => {
                let obscured = model.toggle_obscure_nsfw().await;
                let label = if obscured { "hidden" } else { "shown" };
                model.set_status(format!("Mature content {}", label)).await;
            }
            KeyCode::Char('p') | KeyCode::Char('P') => {
                model.set_active_section(ActiveSection::Publish).await;
            }
            KeyCode::Char('h') | KeyCode::Char('H') | KeyCode::Char('?') => {
                model.show_help_popup().await;
            }
            _ => {}
        }
        Ok(())
    }
}
