use iced::widget::image::Handle;
use iced::widget::{column, container, row, scrollable, text, Column};
use iced::{event, time, window, Element, Event, Length, Subscription, Task, Theme};
use rfd::FileDialog;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::{error, info, warn, Level};

mod api;
mod camera;
mod config;
mod error;
mod source;
mod state;
mod ui;

use api::{GenerationBackend, GenerationClient};
use camera::{CameraState, Facing, WebcamController};
use config::Settings;
use error::{AcquisitionError, CameraError, GenerationError};
use source::samples::{SAMPLE_ITEMS, SAMPLE_MODELS};
use source::{adapter, ImagePayload, SampleImage};
use state::{Slot, TryOnWorkflow, WorkflowState};
use ui::{panels, Previews};

/// Live camera preview refresh interval
const PREVIEW_INTERVAL: Duration = Duration::from_millis(66);

/// File extensions offered by the picker
const IMAGE_EXTENSIONS: [&str; 6] = ["png", "jpg", "jpeg", "webp", "gif", "bmp"];

/// Main application state
struct TryOnStudio {
    /// Inputs, generation lifecycle and recent creations
    workflow: TryOnWorkflow,
    /// Client for the generation backend (shared with background tasks)
    client: Arc<GenerationClient>,
    /// Webcam lifecycle; exclusively owns the camera stream
    camera: WebcamController,
    /// Whether any video input was found at startup
    camera_supported: bool,
    /// Slot the open camera view will fill, if the view is open
    camera_target: Option<Slot>,
    /// Latest live frame
    camera_preview: Option<Handle>,
    /// Acquisition errors, shown next to the slot they belong to
    slot_errors: HashMap<Slot, String>,
    /// Texture handles for everything on screen
    previews: Previews,
    /// Status message to display to the user
    status: String,
}

/// Application messages (events)
#[derive(Debug, Clone)]
pub enum Message {
    /// User clicked "Upload" for a slot
    PickFile(Slot),
    /// A file was dropped on the window
    FileDropped(PathBuf),
    /// Background acquisition finished
    ImageLoaded(Slot, Result<ImagePayload, AcquisitionError>),
    ClearImage(Slot),
    SelectSample(Slot, SampleImage),
    InstructionChanged(String),
    SuggestionSelected(&'static str),
    /// User clicked "Try It On!"
    TryOn,
    /// The generation request returned
    GenerationFinished(Result<ImagePayload, GenerationError>),
    SaveResult,
    ResultSaved(Result<PathBuf, String>),
    /// Open the camera view for a slot
    OpenCamera(Slot),
    /// Acquire the stream once the "Starting camera" view is up
    CameraAcquire,
    CameraTick,
    CapturePhoto,
    SwitchCamera,
    RetryCamera,
    CloseCamera,
}

impl TryOnStudio {
    /// Create a new instance of the application
    fn new() -> (Self, Task<Message>) {
        let settings = Settings::from_build();
        let client = Arc::new(GenerationClient::new(&settings));
        let camera = WebcamController::new(camera::default_backend());
        let camera_supported = camera.is_supported();

        info!(
            "🎨 Try-On Studio initialized (backend: {}, camera: {})",
            client.endpoint(),
            if camera_supported { "available" } else { "unavailable" }
        );

        (
            TryOnStudio {
                workflow: TryOnWorkflow::new(),
                client,
                camera,
                camera_supported,
                camera_target: None,
                camera_preview: None,
                slot_errors: HashMap::new(),
                previews: Previews::default(),
                status: "Ready. Add a photo of yourself and an item to try on.".to_string(),
            },
            Task::none(),
        )
    }

    /// Handle application messages and update state
    fn update(&mut self, message: Message) -> Task<Message> {
        let task = match message {
            Message::PickFile(slot) => {
                let file = FileDialog::new()
                    .set_title(slot.label())
                    .add_filter("Images", &IMAGE_EXTENSIONS)
                    .pick_file();

                match file {
                    Some(path) => self.load_file(slot, path),
                    None => Task::none(),
                }
            }
            Message::FileDropped(path) => {
                // Fill the model first, then the item
                let slot = if self.workflow.image(Slot::Model).is_none() {
                    Slot::Model
                } else {
                    Slot::Item
                };
                self.load_file(slot, path)
            }
            Message::ImageLoaded(slot, Ok(payload)) => {
                self.workflow.set_image(slot, Some(payload));
                self.slot_errors.remove(&slot);
                self.status = format!("{} ready.", slot.label());
                Task::none()
            }
            Message::ImageLoaded(slot, Err(e)) => {
                error!("Acquisition failed for {:?}: {}", slot, e);
                self.status = e.to_string();
                self.slot_errors.insert(slot, e.to_string());
                Task::none()
            }
            Message::ClearImage(slot) => {
                self.workflow.set_image(slot, None);
                self.slot_errors.remove(&slot);
                Task::none()
            }
            Message::SelectSample(slot, sample) => {
                self.status = format!("Loading sample \"{}\"...", sample.alt);
                Task::perform(
                    adapter::from_url(self.client.http().clone(), sample.url.to_string()),
                    move |result| Message::ImageLoaded(slot, result),
                )
            }
            Message::InstructionChanged(text) => {
                self.workflow.set_instruction(text);
                Task::none()
            }
            Message::SuggestionSelected(prompt) => {
                self.workflow.set_instruction(prompt);
                Task::none()
            }
            Message::TryOn => match self.workflow.begin_try_on() {
                Some(job) => {
                    self.status = "Generating...".to_string();
                    let client = Arc::clone(&self.client);
                    Task::perform(
                        async move {
                            client
                                .generate(&job.instruction, &job.model_image, &job.item_image)
                                .await
                        },
                        Message::GenerationFinished,
                    )
                }
                None => {
                    if let WorkflowState::Failure(message) = self.workflow.state() {
                        self.status = message.clone();
                    }
                    Task::none()
                }
            },
            Message::GenerationFinished(outcome) => {
                self.status = match &outcome {
                    Ok(_) => "✅ Try-on complete!".to_string(),
                    Err(e) => format!("Generation failed: {}", e),
                };
                self.workflow.finish(outcome);
                Task::none()
            }
            Message::SaveResult => self.save_result(),
            Message::ResultSaved(Ok(path)) => {
                self.status = format!("💾 Saved to {}", path.display());
                Task::none()
            }
            Message::ResultSaved(Err(e)) => {
                error!("Save failed: {}", e);
                self.status = e;
                Task::none()
            }
            Message::OpenCamera(slot) => {
                if !self.camera_supported {
                    warn!("Camera requested but no camera is available");
                    return Task::none();
                }
                self.camera_target = Some(slot);
                self.camera_preview = None;
                self.camera.request(Facing::User);
                Task::done(Message::CameraAcquire)
            }
            Message::CameraAcquire => {
                self.camera.acquire();
                Task::none()
            }
            Message::CameraTick => {
                if let Some(frame) = self.camera.preview_frame() {
                    let (width, height) = (frame.width(), frame.height());
                    let rgba = image::DynamicImage::ImageRgb8(frame).into_rgba8();
                    self.camera_preview = Some(Handle::from_rgba(width, height, rgba.into_raw()));
                }
                // Frames never touch the workflow
                return Task::none();
            }
            Message::CapturePhoto => {
                match adapter::from_capture(&mut self.camera) {
                    Ok(payload) => {
                        if let Some(slot) = self.camera_target {
                            self.workflow.set_image(slot, Some(payload));
                            self.slot_errors.remove(&slot);
                        }
                        self.close_camera();
                    }
                    // Capture outside Live is a no-op; device errors show in the camera view
                    Err(AcquisitionError::Camera(CameraError::NotLive)) => {}
                    Err(e) => warn!("Capture failed: {}", e),
                }
                Task::none()
            }
            Message::SwitchCamera => {
                self.camera_preview = None;
                self.camera.switch_facing();
                Task::none()
            }
            Message::RetryCamera => {
                self.camera_preview = None;
                self.camera.request(self.camera.facing());
                Task::done(Message::CameraAcquire)
            }
            Message::CloseCamera => {
                self.close_camera();
                Task::none()
            }
        };

        self.previews.refresh(&self.workflow);
        task
    }

    /// Read a file in the background into the given slot
    fn load_file(&mut self, slot: Slot, path: PathBuf) -> Task<Message> {
        self.status = format!("Loading {}...", path.display());
        Task::perform(adapter::from_file(path), move |result| {
            Message::ImageLoaded(slot, result)
        })
    }

    /// Ask where to save the current result, then write it in the background
    fn save_result(&mut self) -> Task<Message> {
        let Some(payload) = self.workflow.result().cloned() else {
            return Task::none();
        };

        let mut dialog = FileDialog::new()
            .set_title("Save Try-On Result")
            .set_file_name(adapter::result_file_name(&payload));
        if let Some(dir) = dirs::picture_dir().or_else(dirs::home_dir) {
            dialog = dialog.set_directory(dir);
        }

        match dialog.save_file() {
            Some(path) => Task::perform(adapter::to_file(payload, path), Message::ResultSaved),
            None => Task::none(),
        }
    }

    fn close_camera(&mut self) {
        self.camera.close();
        self.camera_target = None;
        self.camera_preview = None;
    }

    /// Build the user interface
    fn view(&self) -> Element<Message> {
        if let Some(slot) = self.camera_target {
            return panels::camera_panel(slot, self.camera.state(), self.camera_preview.as_ref());
        }

        let inputs = column![
            self.uploader(Slot::Model),
            panels::samples(Slot::Model, &SAMPLE_MODELS),
            self.uploader(Slot::Item),
            panels::samples(Slot::Item, &SAMPLE_ITEMS),
        ]
        .spacing(20)
        .width(Length::FillPortion(5));

        let mut output = Column::new()
            .spacing(20)
            .width(Length::FillPortion(7))
            .push(panels::instruction_input(self.workflow.instruction()))
            .push(panels::try_on_button(
                self.workflow.can_try_on(),
                self.workflow.is_loading(),
            ))
            .push(panels::result_panel(
                self.workflow.result_view(),
                self.previews.result.as_ref(),
            ));
        if let Some(recent) = panels::recent_grid(&self.previews.recent) {
            output = output.push(recent);
        }

        let content = column![
            text("Virtual Try-On ✨").size(40),
            row![inputs, output].spacing(30),
            text(&self.status).size(14),
        ]
        .spacing(24)
        .padding(30);

        container(scrollable(content))
            .width(Length::Fill)
            .height(Length::Fill)
            .into()
    }

    fn uploader(&self, slot: Slot) -> Element<Message> {
        panels::uploader(
            slot,
            self.previews.slot(slot),
            self.workflow.image(slot).is_some(),
            self.slot_errors.get(&slot).map(String::as_str),
            self.camera_supported,
        )
    }

    /// Dropped files always; camera frames only while the stream is live
    fn subscription(&self) -> Subscription<Message> {
        let drops = event::listen_with(|event, _status, _window| match event {
            Event::Window(window::Event::FileDropped(path)) => Some(Message::FileDropped(path)),
            _ => None,
        });

        if self.camera_target.is_some() && *self.camera.state() == CameraState::Live {
            Subscription::batch([drops, time::every(PREVIEW_INTERVAL).map(|_| Message::CameraTick)])
        } else {
            drops
        }
    }

    /// Set the application theme
    fn theme(&self) -> Theme {
        Theme::Dark
    }
}

fn init_logging() {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();
}

fn main() -> iced::Result {
    init_logging();

    iced::application("Virtual Try-On", TryOnStudio::update, TryOnStudio::view)
        .subscription(TryOnStudio::subscription)
        .theme(TryOnStudio::theme)
        .centered()
        .run_with(TryOnStudio::new)
}
