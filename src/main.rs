use clap::Parser;
use iced::{Element, Task, Theme};
use std::time::Duration;
use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod cli;
mod config;
mod state;
mod ui;

use config::AppConfig;
use state::builder::{self, AdminForm, CopyFeedback, IdGenerator, Preview};
use state::data::{resolve_link, CatalogRecord, RecordId};
use state::manifest::{self, ManifestSource};
use state::query::{self, ClassFilter, SortOrder, ViewState};

/// The two reachable pages
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Catalog,
    Admin,
}

/// Main application state
struct SmartNotes {
    config: AppConfig,
    route: Route,
    dark_mode: bool,
    /// Manifest snapshot, read-only once loaded
    catalog: Vec<CatalogRecord>,
    /// True until the one-shot manifest load finishes
    loading: bool,
    view_state: ViewState,
    form: AdminForm,
    preview: Option<Preview>,
    ids: IdGenerator,
    copy_feedback: CopyFeedback,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// Background manifest load finished (empty on failure)
    ManifestLoaded(Vec<CatalogRecord>),
    Navigate(Route),
    ToggleTheme,
    OpenContact,
    OpenDocument(RecordId, String),

    // Catalog
    SearchChanged(String),
    ClassSelected(ClassFilter),
    ClassToggled(String),
    SubjectToggled(String),
    SortChanged(SortOrder),
    LoadMore,
    ClearFilters,

    // Admin
    AdminClassToggled(String),
    AdminSubjectSelected(String),
    AdminTitleChanged(String),
    AdminFilenameChanged(String),
    CopyPreview,
    /// Clipboard contents read back after copy `generation`
    CopyChecked { generation: u64, contents: Option<String> },
    CopyExpired(u64),
}

impl SmartNotes {
    /// Create the app and start loading the manifest
    fn new(config: AppConfig, route: Route) -> (Self, Task<Message>) {
        let source = ManifestSource::parse(&config.manifest_source);
        info!(%source, ?route, "🎨 {} starting", config.app_title);

        let app = SmartNotes {
            route,
            dark_mode: config.dark_mode,
            catalog: Vec::new(),
            loading: true,
            view_state: ViewState::with_page_size(config.page_size),
            form: AdminForm::default(),
            preview: None,
            ids: IdGenerator::new(),
            copy_feedback: CopyFeedback::default(),
            config,
        };

        (
            app,
            Task::perform(manifest::load_manifest(source), Message::ManifestLoaded),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::ManifestLoaded(records) => {
                info!(count = records.len(), "📊 catalog ready");
                self.catalog = records;
                self.loading = false;
            }
            Message::Navigate(route) => {
                self.route = route;
            }
            Message::ToggleTheme => {
                self.dark_mode = !self.dark_mode;
            }
            Message::OpenContact => {
                open_in_browser(&self.config.contact_url());
            }
            Message::OpenDocument(id, link) => {
                debug!(%id, %link, "opening document");
                match resolve_link(&link, &self.config.site_base_url) {
                    Some(url) => open_in_browser(url.as_str()),
                    None => warn!(
                        %id,
                        %link,
                        base = %self.config.site_base_url,
                        "⚠️  cannot resolve document link"
                    ),
                }
            }

            Message::SearchChanged(search) => self.view_state.set_search(search),
            Message::ClassSelected(filter) => self.view_state.select_class(filter),
            Message::ClassToggled(class) => self.view_state.toggle_class(class),
            Message::SubjectToggled(subject) => self.view_state.toggle_subject(subject),
            Message::SortChanged(sort) => self.view_state.set_sort(sort),
            Message::LoadMore => self.view_state.load_more(),
            Message::ClearFilters => self.view_state.clear_filters(),

            Message::AdminClassToggled(class) => {
                self.form.toggle_class(class);
                self.refresh_preview();
            }
            Message::AdminSubjectSelected(subject) => {
                self.form.select_subject(subject);
                self.refresh_preview();
            }
            Message::AdminTitleChanged(title) => {
                self.form.set_title(title);
                self.refresh_preview();
            }
            Message::AdminFilenameChanged(filename) => {
                self.form.set_filename(filename);
                self.refresh_preview();
            }
            Message::CopyPreview => {
                let Some(preview) = &self.preview else {
                    return Task::none();
                };
                let text = preview.text.clone();
                let generation = self.copy_feedback.begin(text.clone());

                // Read the clipboard back so a refused write never shows "Copied!"
                return iced::clipboard::write::<Message>(text).chain(
                    iced::clipboard::read()
                        .map(move |contents| Message::CopyChecked { generation, contents }),
                );
            }
            Message::CopyChecked { generation, contents } => {
                if self.copy_feedback.confirm(generation, contents.as_deref()) {
                    debug!(generation, "📋 entry copied");
                    let linger = Duration::from_secs(builder::COPY_FEEDBACK_SECS);
                    return Task::perform(
                        async move { tokio::time::sleep(linger).await },
                        move |_| Message::CopyExpired(generation),
                    );
                }
                debug!(generation, "clipboard did not take the entry");
            }
            Message::CopyExpired(generation) => self.copy_feedback.expire(generation),
        }

        Task::none()
    }

    /// Rebuild the admin preview after any form change
    fn refresh_preview(&mut self) {
        self.preview = builder::build_preview(&self.form, &self.ids);
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        match self.route {
            Route::Catalog => ui::catalog::view(ui::catalog::CatalogPage {
                title: &self.config.app_title,
                dark_mode: self.dark_mode,
                loading: self.loading,
                state: &self.view_state,
                view: query::compute_view(&self.catalog, &self.view_state),
            }),
            Route::Admin => ui::admin::view(ui::admin::AdminPage {
                title: &self.config.app_title,
                dark_mode: self.dark_mode,
                form: &self.form,
                preview: self.preview.as_ref(),
                copied: self.copy_feedback.is_copied(),
            }),
        }
    }

    fn title(&self) -> String {
        match self.route {
            Route::Catalog => self.config.app_title.clone(),
            Route::Admin => format!("{} · Admin", self.config.app_title),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        if self.dark_mode {
            Theme::Dark
        } else {
            Theme::Light
        }
    }
}

/// Hand a URL to the system browser. Failures are only logged.
fn open_in_browser(url: &str) {
    match open::that_detached(url) {
        Ok(()) => debug!(%url, "🔗 opened"),
        Err(err) => warn!(%url, error = %err, "⚠️  could not open browser"),
    }
}

fn main() -> iced::Result {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("smart_notes=info")),
        )
        .init();

    let cli = cli::Cli::parse();
    let config = cli.resolve_config();
    let route = match cli.view {
        cli::StartView::Catalog => Route::Catalog,
        cli::StartView::Admin => Route::Admin,
    };

    iced::application(SmartNotes::title, SmartNotes::update, SmartNotes::view)
        .theme(SmartNotes::theme)
        .centered()
        .run_with(move || SmartNotes::new(config, route))
}

#[cfg(test)]
mod tests {
    use super::*;
    use state::manifest::parse_manifest;

    fn app() -> SmartNotes {
        let (app, _task) = SmartNotes::new(AppConfig::default(), Route::Catalog);
        app
    }

    fn records(count: usize) -> Vec<CatalogRecord> {
        let entries: Vec<String> = (0..count)
            .map(|i| {
                format!(
                    r#"{{"id": {i}, "title": "Note {i}", "subject": "Maths", "standard": "{}", "date": "2024-01-{:02}"}}"#,
                    5 + i % 6,
                    1 + i % 28
                )
            })
            .collect();
        parse_manifest(format!("[{}]", entries.join(",")).as_bytes()).unwrap()
    }

    #[test]
    fn test_manifest_loaded_ends_loading() {
        let mut app = app();
        assert!(app.loading);
        let _ = app.update(Message::ManifestLoaded(records(3)));
        assert!(!app.loading);
        assert_eq!(app.catalog.len(), 3);
    }

    #[test]
    fn test_failed_load_is_an_empty_catalog() {
        let mut app = app();
        let _ = app.update(Message::ManifestLoaded(Vec::new()));
        let view = query::compute_view(&app.catalog, &app.view_state);
        assert!(view.records.is_empty());
        assert_eq!(view.count_label(), "0 Notes Found");
    }

    #[test]
    fn test_search_resets_load_more() {
        let mut app = app();
        let _ = app.update(Message::ManifestLoaded(records(60)));
        let _ = app.update(Message::LoadMore);
        let _ = app.update(Message::LoadMore);
        assert_eq!(app.view_state.visible_count, 63);

        let view = query::compute_view(&app.catalog, &app.view_state);
        assert_eq!(view.page(&app.view_state).len(), 60);
        assert!(!view.has_more(&app.view_state));

        let _ = app.update(Message::SearchChanged("Note 1".to_string()));
        assert_eq!(app.view_state.visible_count, 21);
    }

    #[test]
    fn test_admin_preview_follows_form() {
        let mut app = app();
        let _ = app.update(Message::Navigate(Route::Admin));
        assert!(app.preview.is_none());

        let _ = app.update(Message::AdminClassToggled("10".to_string()));
        let _ = app.update(Message::AdminSubjectSelected("Science".to_string()));
        let _ = app.update(Message::AdminFilenameChanged("unit1".to_string()));
        let preview = app.preview.clone().unwrap();
        assert_eq!(preview.record.url, "/materials/class10/science/unit1.pdf");

        // Clearing every field goes back to the empty state
        let _ = app.update(Message::AdminClassToggled("10".to_string()));
        let _ = app.update(Message::AdminFilenameChanged(String::new()));
        assert!(app.preview.is_some());
        app.form.subject = None;
        app.refresh_preview();
        assert!(app.preview.is_none());
    }

    #[test]
    fn test_copy_without_preview_is_ignored() {
        let mut app = app();
        let _ = app.update(Message::CopyPreview);
        assert!(!app.copy_feedback.is_copied());
    }

    #[test]
    fn test_copy_feedback_flow() {
        let mut app = app();
        let _ = app.update(Message::AdminTitleChanged("Unit 1".to_string()));
        let text = app.preview.clone().unwrap().text;

        let _ = app.update(Message::CopyPreview);
        let _ = app.update(Message::CopyChecked {
            generation: 1,
            contents: Some(text),
        });
        assert!(app.copy_feedback.is_copied());

        // Typing doesn't cancel the acknowledgement
        let _ = app.update(Message::AdminTitleChanged("Unit 2".to_string()));
        assert!(app.copy_feedback.is_copied());

        let _ = app.update(Message::CopyExpired(1));
        assert!(!app.copy_feedback.is_copied());
    }

    #[test]
    fn test_theme_toggle() {
        let mut app = app();
        assert_eq!(app.theme(), Theme::Light);
        let _ = app.update(Message::ToggleTheme);
        assert_eq!(app.theme(), Theme::Dark);
    }
}
