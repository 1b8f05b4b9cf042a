use std::path::{Path, PathBuf};

use dialoguer::{theme::ColorfulTheme, Confirm, Input};

use crate::core::{ConfirmPrompt, FileDialog, FilePurpose};

use super::shell::CliMode;

/// Confirmation prompt backed by dialoguer. Script mode auto-approves: a
/// scripted line is already an explicit instruction, and there is nobody at
/// the terminal to ask.
pub(crate) struct CliConfirm {
    mode: CliMode,
    theme: ColorfulTheme,
}

impl CliConfirm {
    pub(crate) fn new(mode: CliMode) -> Self {
        Self {
            mode,
            theme: ColorfulTheme::default(),
        }
    }
}

impl ConfirmPrompt for CliConfirm {
    fn confirm(&mut self, question: &str) -> bool {
        match self.mode {
            CliMode::Script => true,
            CliMode::Interactive => Confirm::with_theme(&self.theme)
                .with_prompt(question)
                .default(false)
                .interact()
                .unwrap_or(false),
        }
    }
}

/// File-choice service for the terminal. A path given as a command argument
/// is used directly; otherwise interactive mode prompts for one (empty input
/// or an aborted prompt cancels) and script mode cancels outright.
pub(crate) struct CliFileDialog {
    mode: CliMode,
    theme: ColorfulTheme,
    preset: Option<PathBuf>,
    remembered: Option<PathBuf>,
    chosen: Option<PathBuf>,
}

impl CliFileDialog {
    pub(crate) fn new(
        mode: CliMode,
        preset: Option<PathBuf>,
        remembered: Option<PathBuf>,
    ) -> Self {
        Self {
            mode,
            theme: ColorfulTheme::default(),
            preset,
            remembered,
            chosen: None,
        }
    }

    /// The path the dialog handed out, for reporting and remembering.
    pub(crate) fn chosen(&self) -> Option<&Path> {
        self.chosen.as_deref()
    }

    fn choose(&mut self, prompt: &str, default: Option<String>) -> Option<PathBuf> {
        if let Some(path) = self.preset.take() {
            self.chosen = Some(path.clone());
            return Some(path);
        }
        if self.mode == CliMode::Script {
            return None;
        }

        let mut input = Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .allow_empty(true);
        if let Some(default) = default {
            input = input.default(default);
        }
        match input.interact_text() {
            Ok(text) if !text.trim().is_empty() => {
                let path = PathBuf::from(text.trim());
                self.chosen = Some(path.clone());
                Some(path)
            }
            _ => None,
        }
    }

    fn remembered_display(&self) -> Option<String> {
        self.remembered.as_ref().map(|p| p.display().to_string())
    }
}

impl FileDialog for CliFileDialog {
    fn choose_open(&mut self, purpose: FilePurpose) -> Option<PathBuf> {
        let prompt = match purpose {
            FilePurpose::Snapshot => "Snapshot file to load",
            FilePurpose::Csv => "CSV file to import",
        };
        let default = self.remembered_display();
        self.choose(prompt, default)
    }

    fn choose_save(&mut self, purpose: FilePurpose, suggested_name: &str) -> Option<PathBuf> {
        let prompt = match purpose {
            FilePurpose::Snapshot => "Save snapshot as",
            FilePurpose::Csv => "Export CSV as",
        };
        let default = self
            .remembered_display()
            .unwrap_or_else(|| suggested_name.to_string());
        self.choose(prompt, Some(default))
    }
}
