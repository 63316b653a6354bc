use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use iced::widget::{column, container, image, scrollable, Column};
use iced::{Alignment, Color, Element, Length, Task, Theme};
use iced_aw::Wrap;
use tracing_subscriber::EnvFilter;

mod config;
mod date;
mod error;
mod indexer;
mod media;
mod state;
mod ui;

use config::Settings;
use error::GalleryError;
use indexer::client::IndexerClient;
use media::kind::MediaKind;
use media::preview::{PreviewLoader, PreviewPlan};
use media::uri::Gateway;
use state::data::ArtRecord;
use state::gallery::{FetchRequest, Gallery, GalleryConfig, Phase};
use ui::tile::TileState;

/// Command-line arguments
#[derive(Parser, Debug)]
#[command(name = "art-gallery")]
#[command(about = "Browse digital art indexed on Tezos")]
struct Args {
    /// Open "Your own" and search this holder address right away
    #[arg(short, long)]
    address: Option<String>,

    /// Gallery shown at startup
    #[arg(short, long, value_enum, default_value_t = ViewKind::Random)]
    view: ViewKind,

    /// Read settings from this file instead of the default location
    #[arg(short, long)]
    config: Option<PathBuf>,
}

/// Which gallery is on screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ViewKind {
    /// Whole collection, shuffled
    Random,
    /// Collection, most recently acquired first
    Latest,
    /// Any holder's collection
    Yours,
}

/// Main application state
struct ArtGallery {
    settings: Settings,
    indexer: IndexerClient,
    previews: PreviewLoader,
    gateway: Gateway,
    view: ViewKind,
    /// The mounted gallery; replaced whenever the view changes
    gallery: Gallery,
    /// Preview progress for the tiles on the current page
    tiles: HashMap<String, TileState>,
    /// Bumped whenever `tiles` is reset; previews started earlier are dropped
    preview_generation: u64,
    /// Text in the address field
    address_input: String,
    accent: Color,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User picked another gallery
    SwitchView(ViewKind),
    /// Indexer answered a fetch
    RecordsFetched {
        generation: u64,
        result: Result<Vec<ArtRecord>, Arc<GalleryError>>,
    },
    /// A tile's preview finished loading or gave up
    PreviewLoaded {
        generation: u64,
        key: String,
        result: Result<image::Handle, Arc<GalleryError>>,
    },
    PreviousPage,
    NextPage,
    AddressChanged(String),
    SubmitAddress,
    /// Leave the address search for the random gallery
    GoBack,
    /// Open the detail dialog for the n-th tile on the page
    OpenDetail(usize),
    CloseDetail,
    /// Hand a URL to the system's default handler
    OpenLink(String),
}

fn grid_id() -> scrollable::Id {
    scrollable::Id::new("gallery-grid")
}

impl ArtGallery {
    /// Create a new instance of the application
    fn new(settings: Settings, http: reqwest::Client, args: Args) -> (Self, Task<Message>) {
        let indexer = IndexerClient::new(http.clone(), settings.endpoint.clone());
        let previews = PreviewLoader::new(http, settings.image_timeout(), settings.preview_size);
        let gateway = Gateway::new(settings.gateway.clone());

        tracing::info!(endpoint = indexer.endpoint(), "🎨 Art gallery initialized");

        let view = if args.address.is_some() {
            ViewKind::Yours
        } else {
            args.view
        };
        let gallery = Gallery::new(gallery_config(view, &settings));

        let mut app = ArtGallery {
            settings,
            indexer,
            previews,
            gateway,
            view,
            gallery,
            tiles: HashMap::new(),
            preview_generation: 0,
            address_input: String::new(),
            accent: ui::search::random_accent(),
        };
        let task = app.mount(view, args.address);
        (app, task)
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::SwitchView(view) => self.mount(view, None),
            Message::RecordsFetched { generation, result } => {
                if self.gallery.apply(generation, result) {
                    self.load_previews()
                } else {
                    Task::none()
                }
            }
            Message::PreviewLoaded {
                generation,
                key,
                result,
            } => {
                // Keys repeat across pages when records lack an ophash
                if generation != self.preview_generation {
                    tracing::debug!(%key, "dropping preview for a previous page");
                    return Task::none();
                }
                if let Some(tile) = self.tiles.get_mut(&key) {
                    *tile = match result {
                        Ok(handle) => TileState::Loaded(handle),
                        Err(_) => TileState::Unavailable,
                    };
                }
                Task::none()
            }
            Message::PreviousPage => {
                let before = self.gallery.page();
                let request = self.gallery.previous_page();
                self.page_changed(before, request)
            }
            Message::NextPage => {
                let before = self.gallery.page();
                let request = self.gallery.next_page();
                self.page_changed(before, request)
            }
            Message::AddressChanged(address) => {
                self.address_input = address;
                Task::none()
            }
            Message::SubmitAddress => match self.gallery.submit_address(&self.address_input) {
                Some(request) => {
                    tracing::info!(address = %self.address_input.trim(), "🔍 Searching holder");
                    self.fetch(request)
                }
                None => Task::none(),
            },
            Message::GoBack => self.mount(ViewKind::Random, None),
            Message::OpenDetail(index) => {
                self.gallery.open_detail(index);
                Task::none()
            }
            Message::CloseDetail => {
                self.gallery.close_detail();
                Task::none()
            }
            Message::OpenLink(url) => {
                if let Err(err) = open::that_detached(&url) {
                    tracing::warn!(%url, error = %err, "⚠️  Could not open link");
                }
                Task::none()
            }
        }
    }

    /// Build the user interface
    fn view(&self) -> Element<'_, Message> {
        let body: Element<'_, Message> = match self.gallery.phase() {
            Phase::Loading => ui::loading(),
            Phase::Idle if self.gallery.is_searchable() => {
                ui::search::view(&self.address_input, self.accent)
            }
            _ => self.grid(),
        };

        let page = column![ui::nav(self.view), body]
            .width(Length::Fill)
            .height(Length::Fill);

        match self.gallery.detail() {
            Some((index, record)) => {
                let preview = self.tiles.get(&record.tile_key(index));
                ui::dialog::modal(
                    page,
                    ui::dialog::view(record, preview, &self.gateway, &self.settings),
                    Message::CloseDetail,
                )
            }
            None => page.into(),
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }

    /// Replace the gallery with a fresh one for `view`
    fn mount(&mut self, view: ViewKind, initial_address: Option<String>) -> Task<Message> {
        self.view = view;
        self.gallery.reconfigure(gallery_config(view, &self.settings));
        self.reset_tiles();
        self.address_input.clear();
        if view == ViewKind::Yours {
            self.accent = ui::search::random_accent();
        }

        let request = match initial_address {
            Some(address) => {
                self.address_input = address;
                self.gallery.mount();
                self.gallery.submit_address(&self.address_input)
            }
            None => self.gallery.mount(),
        };

        match request {
            Some(request) => self.fetch(request),
            None => Task::none(),
        }
    }

    fn fetch(&mut self, request: FetchRequest) -> Task<Message> {
        self.reset_tiles();
        let indexer = self.indexer.clone();
        let FetchRequest { generation, query } = request;
        Task::perform(
            async move { indexer.fetch(&query).await.map_err(Arc::new) },
            move |result| Message::RecordsFetched { generation, result },
        )
    }

    /// Kick off preview loads for every tile on the current page
    fn load_previews(&mut self) -> Task<Message> {
        self.reset_tiles();
        let generation = self.preview_generation;
        let mut tasks = Vec::new();

        for (index, record) in self.gallery.visible().iter().enumerate() {
            let kind = MediaKind::classify(record);
            if !kind.has_preview() {
                continue;
            }

            let key = record.tile_key(index);
            let plan = PreviewPlan::for_record(record, kind, &self.gateway);
            if plan.is_empty() {
                self.tiles.insert(key, TileState::Unavailable);
                continue;
            }

            self.tiles.insert(key.clone(), TileState::Loading);
            let loader = self.previews.clone();
            tasks.push(Task::perform(loader.load(plan), move |result| {
                Message::PreviewLoaded {
                    generation,
                    key: key.clone(),
                    result,
                }
            }));
        }

        Task::batch(tasks)
    }

    fn reset_tiles(&mut self) {
        self.tiles.clear();
        self.preview_generation += 1;
    }

    fn page_changed(&mut self, before: usize, request: Option<FetchRequest>) -> Task<Message> {
        if self.gallery.page() == before {
            return Task::none();
        }
        tracing::debug!(page = self.gallery.page(), "page changed");

        let work = match request {
            Some(request) => self.fetch(request),
            None => self.load_previews(),
        };
        Task::batch([
            scrollable::snap_to(grid_id(), scrollable::RelativeOffset::START),
            work,
        ])
    }

    /// Tile grid plus pager for the current page
    fn grid(&self) -> Element<'_, Message> {
        let tiles: Vec<Element<'_, Message>> = self
            .gallery
            .visible()
            .iter()
            .enumerate()
            .map(|(index, record)| {
                let preview = self.tiles.get(&record.tile_key(index));
                ui::tile::view(record, index, preview, &self.gateway)
            })
            .collect();
        let has_records = !tiles.is_empty();

        let mut content: Column<'_, Message> = column![container(
            Wrap::with_elements(tiles).spacing(8.0).line_spacing(8.0)
        )
        .width(Length::Fill)
        .center_x(Length::Fill)]
        .spacing(16)
        .padding(16)
        .align_x(Alignment::Center);

        // The address pager only appears once a search found something
        let show_pager = self.gallery.total_pages() > 1
            && (has_records || !self.gallery.is_searchable());
        if show_pager {
            content = content.push(ui::pager::view(
                self.gallery.page(),
                self.gallery.total_pages(),
            ));
        }
        if self.gallery.is_searchable() && !has_records {
            content = content.push(ui::search::go_back(self.accent));
        }

        scrollable(content)
            .id(grid_id())
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }
}

/// Gallery flavour behind each view
fn gallery_config(view: ViewKind, settings: &Settings) -> GalleryConfig {
    match view {
        ViewKind::Random => GalleryConfig::unranked(settings),
        ViewKind::Latest => GalleryConfig::recency(settings),
        ViewKind::Yours => GalleryConfig::address_scoped(settings),
    }
}

fn main() -> iced::Result {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    let settings = match Settings::load(args.config.as_deref()) {
        Ok(settings) => settings,
        Err(err) => {
            tracing::error!(error = %err, "❌ Could not read config, using defaults");
            Settings::default()
        }
    };

    let http = match reqwest::Client::builder()
        .user_agent(concat!("art-gallery/", env!("CARGO_PKG_VERSION")))
        .build()
    {
        Ok(http) => http,
        Err(err) => {
            tracing::error!(error = %err, "❌ Could not create HTTP client");
            std::process::exit(1);
        }
    };

    iced::application("Art Gallery", ArtGallery::update, ArtGallery::view)
        .theme(ArtGallery::theme)
        .centered()
        .run_with(move || ArtGallery::new(settings, http, args))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn app(view: ViewKind) -> ArtGallery {
        let args = Args {
            address: None,
            view,
            config: None,
        };
        ArtGallery::new(Settings::default(), reqwest::Client::new(), args).0
    }

    /// Three previewable records without an ophash, so keys fall back to "#i"
    fn page_of(label: &str) -> Vec<ArtRecord> {
        (0..3)
            .map(|i| ArtRecord {
                name: Some(format!("{} {}", label, i)),
                display_uri: Some(format!("ipfs://Qm{}{}", label, i)),
                ..ArtRecord::default()
            })
            .collect()
    }

    fn pixel() -> image::Handle {
        image::Handle::from_rgba(1, 1, vec![255, 0, 0, 255])
    }

    #[test]
    fn test_preview_from_previous_page_is_dropped() {
        let mut app = app(ViewKind::Latest);

        // Mount issued the first request, the page change the second
        let _ = app.update(Message::RecordsFetched {
            generation: 1,
            result: Ok(page_of("first")),
        });
        let first_page = app.preview_generation;
        assert!(matches!(app.tiles.get("#0"), Some(TileState::Loading)));

        let _ = app.update(Message::NextPage);
        let _ = app.update(Message::RecordsFetched {
            generation: 2,
            result: Ok(page_of("second")),
        });
        assert_eq!(app.gallery.page(), 2);
        assert_eq!(app.gallery.visible()[0].tile_key(0), "#0");

        let _ = app.update(Message::PreviewLoaded {
            generation: first_page,
            key: "#0".into(),
            result: Ok(pixel()),
        });
        assert!(matches!(app.tiles.get("#0"), Some(TileState::Loading)));

        let _ = app.update(Message::PreviewLoaded {
            generation: app.preview_generation,
            key: "#0".into(),
            result: Ok(pixel()),
        });
        assert!(matches!(app.tiles.get("#0"), Some(TileState::Loaded(_))));
    }

    #[test]
    fn test_view_builds_grid_and_dialog() {
        let mut app = app(ViewKind::Latest);
        let _ = app.update(Message::RecordsFetched {
            generation: 1,
            result: Ok(page_of("grid")),
        });
        let _ = app.view();

        let _ = app.update(Message::OpenDetail(1));
        assert!(app.gallery.detail().is_some());
        let _ = app.view();
    }

    #[test]
    fn test_switching_view_drops_pending_previews() {
        let mut app = app(ViewKind::Latest);
        let _ = app.update(Message::RecordsFetched {
            generation: 1,
            result: Ok(page_of("latest")),
        });
        let latest = app.preview_generation;

        let _ = app.update(Message::SwitchView(ViewKind::Yours));
        let _ = app.update(Message::PreviewLoaded {
            generation: latest,
            key: "#0".into(),
            result: Err(Arc::new(GalleryError::NoPreview)),
        });
        assert!(app.tiles.is_empty());
        assert_eq!(app.gallery.phase(), Phase::Idle);
    }
}
