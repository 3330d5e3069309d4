use eframe::egui;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationResult {
    None,
    Confirmed,
    Cancelled,
}

/// What a confirmed prompt should do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PendingAction {
    RunQuickAction { label: String },
    RemoveService { id: String, name: String },
    RemoveWidget { id: String, title: String },
    RemoveSection { id: String, title: String },
}

impl PendingAction {
    pub fn title(&self) -> &'static str {
        match self {
            PendingAction::RunQuickAction { .. } => "Confirm action",
            _ => "Confirm removal",
        }
    }

    pub fn description(&self) -> String {
        match self {
            PendingAction::RunQuickAction { label } => format!("Run \"{label}\"?"),
            PendingAction::RemoveService { name, .. } => format!("Remove service \"{name}\"?"),
            PendingAction::RemoveWidget { title, .. } => format!("Remove widget \"{title}\"?"),
            PendingAction::RemoveSection { title, .. } => format!("Remove section \"{title}\"?"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfirmationModal {
    open: bool,
    title: String,
    description: String,
    warning: String,
    confirm_label: String,
    cancel_label: String,
    pending: Option<PendingAction>,
}

impl Default for ConfirmationModal {
    fn default() -> Self {
        Self {
            open: false,
            title: "Confirm".into(),
            description: String::new(),
            warning: "This action cannot be undone.".into(),
            confirm_label: "Confirm".into(),
            cancel_label: "Cancel".into(),
            pending: None,
        }
    }
}

impl ConfirmationModal {
    /// Ask before running `action`. An empty `warning` uses the default text.
    pub fn open_for(&mut self, action: PendingAction, warning: &str) {
        self.title = action.title().into();
        self.description = action.description();
        self.warning = if warning.trim().is_empty() {
            "This action cannot be undone.".into()
        } else {
            warning.trim().to_string()
        };
        self.confirm_label = match action {
            PendingAction::RunQuickAction { .. } => "Run".into(),
            _ => "Remove".into(),
        };
        self.cancel_label = "Cancel".into();
        self.pending = Some(action);
        self.open = true;
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Draw the modal. On `Confirmed` the pending action is handed back.
    pub fn ui(&mut self, ctx: &egui::Context) -> (ConfirmationResult, Option<PendingAction>) {
        if !self.open {
            return (ConfirmationResult::None, None);
        }
        let mut result = ConfirmationResult::None;
        let mut open = true;
        egui::Window::new(self.title.clone())
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .open(&mut open)
            .show(ctx, |ui| {
                if !self.description.is_empty() {
                    ui.label(&self.description);
                }
                ui.colored_label(egui::Color32::YELLOW, &self.warning);
                ui.horizontal(|ui| {
                    if ui.button(&self.confirm_label).clicked() {
                        result = ConfirmationResult::Confirmed;
                    }
                    if ui.button(&self.cancel_label).clicked() {
                        result = ConfirmationResult::Cancelled;
                    }
                });
            });
        if result != ConfirmationResult::None {
            self.open = false;
        }
        if !open {
            self.open = false;
            if result == ConfirmationResult::None {
                result = ConfirmationResult::Cancelled;
            }
        }
        let action = match result {
            ConfirmationResult::Confirmed => self.pending.take(),
            ConfirmationResult::Cancelled => {
                self.pending = None;
                None
            }
            ConfirmationResult::None => None,
        };
        (result, action)
    }
}
