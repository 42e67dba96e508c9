//! Implements InputPort. Inquire-based interactive session.
//!
//! Each loop iteration renders the screen for the controller's status and
//! maps the chosen action onto the controller.

use super::progress::AnalysisSpinner;
use super::view::{Screen, render_brand_form, render_error_panel, render_report};
use crate::domain::{BrandList, DomainError, MAX_BRANDS};
use crate::ports::{InputPort, ReportExportPort};
use crate::usecases::AnalysisController;
use async_trait::async_trait;
use inquire::error::InquireError;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Select, Text};
use std::fmt;
use std::io::stdout;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{info, warn};

/// Applies the prompt theme globally. Called once from `init_ui`.
pub fn apply_theme() {
    let config = RenderConfig::default_colored()
        .with_prompt_prefix(Styled::new("›").with_fg(Color::LightBlue))
        .with_highlighted_option_prefix(Styled::new("▸").with_fg(Color::LightGreen));
    inquire::set_global_render_config(config);
}

/// Action offered on the brand form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormAction {
    Edit { index: usize, current: String },
    Add { count: usize },
    Remove,
    Generate,
    Quit,
}

impl fmt::Display for FormAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormAction::Edit { index, current } if current.trim().is_empty() => {
                write!(f, "Edit brand 0{}", index + 1)
            }
            FormAction::Edit { index, current } => {
                write!(f, "Edit brand 0{} ({})", index + 1, current)
            }
            FormAction::Add { count } => write!(f, "+ Add brand ({}/{})", count, MAX_BRANDS),
            FormAction::Remove => f.write_str("Remove a brand"),
            FormAction::Generate => f.write_str("Generate consulting report"),
            FormAction::Quit => f.write_str("Quit"),
        }
    }
}

/// Menu for the brand form. Add/Remove/Generate only appear when they would do something.
pub fn form_actions(brands: &BrandList, can_submit: bool) -> Vec<FormAction> {
    let mut actions: Vec<FormAction> = brands
        .slots()
        .iter()
        .enumerate()
        .map(|(index, current)| FormAction::Edit {
            index,
            current: current.clone(),
        })
        .collect();
    if !brands.is_full() {
        actions.push(FormAction::Add {
            count: brands.len(),
        });
    }
    if brands.len() > 1 {
        actions.push(FormAction::Remove);
    }
    if can_submit {
        actions.push(FormAction::Generate);
    }
    actions.push(FormAction::Quit);
    actions
}

/// Action offered on the completed report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportAction {
    Export,
    Restart,
    Quit,
}

impl fmt::Display for ReportAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ReportAction::Export => "Export printable document (Markdown)",
            ReportAction::Restart => "Start a new analysis",
            ReportAction::Quit => "Quit",
        })
    }
}

/// Action offered on the error panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorAction {
    BackToBrands,
    Quit,
}

impl fmt::Display for ErrorAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ErrorAction::BackToBrands => "Back to edit brands",
            ErrorAction::Quit => "Quit",
        })
    }
}

/// `None` when the user cancelled (Esc / Ctrl+C), which ends the session.
fn prompt_result<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

fn io_err(e: std::io::Error) -> DomainError {
    DomainError::Ui(e.to_string())
}

/// TUI adapter. Inquire prompts over the shared controller.
pub struct TuiInputPort {
    controller: Mutex<AnalysisController>,
    exporter: Arc<dyn ReportExportPort>,
}

impl TuiInputPort {
    pub fn new(controller: AnalysisController, exporter: Arc<dyn ReportExportPort>) -> Self {
        Self {
            controller: Mutex::new(controller),
            exporter,
        }
    }

    /// Returns false when the session should end.
    async fn brand_form(&self, controller: &mut AnalysisController) -> Result<bool, DomainError> {
        render_brand_form(&mut stdout(), controller.brands()).map_err(io_err)?;
        let actions = form_actions(controller.brands(), controller.can_submit());
        let Some(action) = prompt_result(Select::new("What next?", actions).prompt())? else {
            return Ok(false);
        };

        match action {
            FormAction::Edit { index, current } => {
                let text = prompt_result(
                    Text::new(&format!("Brand 0{}:", index + 1))
                        .with_initial_value(&current)
                        .with_placeholder("Brand name (e.g. 蔚来)")
                        .prompt(),
                )?;
                if let Some(text) = text {
                    controller.update_brand(index, text);
                }
            }
            FormAction::Add { .. } => {
                controller.add_brand();
            }
            FormAction::Remove => {
                let slots: Vec<String> = controller
                    .brands()
                    .slots()
                    .iter()
                    .enumerate()
                    .map(|(i, b)| format!("0{} {}", i + 1, b))
                    .collect();
                let picked = prompt_result(Select::new("Remove which brand?", slots).raw_prompt())?;
                if let Some(picked) = picked {
                    controller.remove_brand(picked.index);
                }
            }
            FormAction::Generate => {
                let spinner = AnalysisSpinner::start(controller.brands().active().len());
                controller.submit().await;
                spinner.finish();
            }
            FormAction::Quit => return Ok(false),
        }
        Ok(true)
    }

    async fn error_panel(&self, controller: &mut AnalysisController) -> Result<bool, DomainError> {
        let message = controller.error().unwrap_or_default().to_string();
        render_error_panel(&mut stdout(), &message).map_err(io_err)?;
        let options = vec![ErrorAction::BackToBrands, ErrorAction::Quit];
        match prompt_result(Select::new("", options).prompt())? {
            Some(ErrorAction::BackToBrands) => {
                controller.restart();
                Ok(true)
            }
            Some(ErrorAction::Quit) | None => Ok(false),
        }
    }

    async fn report_screen(
        &self,
        controller: &mut AnalysisController,
        rendered: &mut bool,
    ) -> Result<bool, DomainError> {
        let Some(report) = controller.report() else {
            return Ok(true);
        };
        if !*rendered {
            render_report(
                &mut stdout(),
                report,
                controller.analyzed_brands(),
                controller.model_name(),
            )
            .map_err(io_err)?;
            *rendered = true;
        }

        let options = vec![ReportAction::Export, ReportAction::Restart, ReportAction::Quit];
        match prompt_result(Select::new("Report ready", options).prompt())? {
            Some(ReportAction::Export) => {
                match self
                    .exporter
                    .export(controller.analyzed_brands(), controller.model_name(), report)
                    .await
                {
                    Ok(path) => println!("Saved printable report: {}", path.display()),
                    Err(e) => {
                        warn!(error = %e, "export failed");
                        render_error_panel(&mut stdout(), &e.user_message()).map_err(io_err)?;
                    }
                }
                Ok(true)
            }
            Some(ReportAction::Restart) => {
                controller.restart();
                *rendered = false;
                Ok(true)
            }
            Some(ReportAction::Quit) | None => Ok(false),
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut controller = self.controller.lock().await;
        let mut report_rendered = false;

        loop {
            let keep_going = match Screen::for_status(controller.status()) {
                Screen::BrandForm => self.brand_form(&mut controller).await?,
                Screen::ErrorPanel => self.error_panel(&mut controller).await?,
                Screen::Report => {
                    self.report_screen(&mut controller, &mut report_rendered)
                        .await?
                }
                // submit() is awaited inline, so the loop never observes this.
                Screen::Loading => {
                    return Err(DomainError::Ui(
                        "analysis still running when the screen was drawn".to_string(),
                    ));
                }
            };
            if !keep_going {
                break;
            }
        }

        info!("session ended");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_form_actions_single_blank_slot() {
        let actions = form_actions(&BrandList::new(), false);
        assert_eq!(
            actions,
            vec![
                FormAction::Edit {
                    index: 0,
                    current: String::new()
                },
                FormAction::Add { count: 1 },
                FormAction::Quit,
            ]
        );
    }

    #[test]
    fn test_form_actions_full_list() {
        let mut brands = BrandList::new();
        while brands.add_slot() {}
        brands.update_slot(0, "蔚来");
        let actions = form_actions(&brands, true);
        assert!(!actions.iter().any(|a| matches!(a, FormAction::Add { .. })));
        assert!(actions.contains(&FormAction::Remove));
        assert!(actions.contains(&FormAction::Generate));
        assert_eq!(actions.len(), MAX_BRANDS + 3);
    }

    #[test]
    fn test_action_labels() {
        let edit = FormAction::Edit {
            index: 0,
            current: "蔚来".into(),
        };
        assert_eq!(edit.to_string(), "Edit brand 01 (蔚来)");
        assert_eq!(FormAction::Add { count: 2 }.to_string(), "+ Add brand (2/5)");
        assert_eq!(ErrorAction::BackToBrands.to_string(), "Back to edit brands");
    }

    #[test]
    fn test_cancel_ends_session_without_error() {
        let result: Result<String, InquireError> = Err(InquireError::OperationCanceled);
        assert!(matches!(prompt_result(result), Ok(None)));
    }
}
