/// View builders for the try-on screen
///
/// Each function renders one panel from plain data; all state lives in the
/// application struct.

use iced::widget::image::Handle;
use iced::widget::{button, column, container, row, text, text_input, Column, Image, Row, Space};
use iced::{Alignment, ContentFit, Element, Length};

use crate::camera::CameraState;
use crate::source::SampleImage;
use crate::state::data::PROMPT_SUGGESTIONS;
use crate::state::{ResultView, Slot};
use crate::Message;

/// Height of the upload previews
const UPLOAD_HEIGHT: f32 = 256.0;

/// Minimum height of the result area
const RESULT_HEIGHT: f32 = 480.0;

/// Size of a recent creation thumbnail
const RECENT_SIZE: f32 = 140.0;

/// Upload slot: title, actions, preview and any acquisition error
pub fn uploader<'a>(
    slot: Slot,
    preview: Option<&Handle>,
    has_image: bool,
    error: Option<&'a str>,
    camera_supported: bool,
) -> Element<'a, Message> {
    let mut actions = Row::new()
        .spacing(10)
        .push(button(text("Upload")).on_press(Message::PickFile(slot)))
        .push(
            button(text("Take Photo"))
                .style(button::secondary)
                .on_press_maybe(camera_supported.then_some(Message::OpenCamera(slot))),
        );
    if has_image {
        actions = actions.push(
            button(text("Clear"))
                .style(button::danger)
                .on_press(Message::ClearImage(slot)),
        );
    }

    let body: Element<'a, Message> = match preview {
        Some(handle) => Image::<Handle>::new(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fixed(UPLOAD_HEIGHT))
            .into(),
        None if has_image => centered(text("Preview unavailable"), UPLOAD_HEIGHT),
        None => centered(
            text("Drop an image on the window or click Upload").size(14),
            UPLOAD_HEIGHT,
        ),
    };

    let mut content = column![
        row![text(slot.label()).size(18), Space::with_width(Length::Fill), actions]
            .align_y(Alignment::Center),
        container(body).style(container::rounded_box).padding(4),
    ]
    .spacing(8);

    if let Some(message) = error {
        content = content.push(text(message).size(14).style(text::danger));
    }

    content.into()
}

/// Preset samples for one slot
pub fn samples<'a>(slot: Slot, samples: &'a [SampleImage]) -> Element<'a, Message> {
    let title = match slot {
        Slot::Model => "Or try a sample model:",
        Slot::Item => "Or try a sample item:",
    };

    let buttons = samples.iter().map(|sample| {
        button(text(sample.alt).size(13))
            .style(button::secondary)
            .on_press(Message::SelectSample(slot, *sample))
            .into()
    });

    column![text(title).size(15), Row::with_children(buttons).spacing(8)]
        .spacing(6)
        .into()
}

/// Custom instruction box plus suggestions
pub fn instruction_input(value: &str) -> Element<'_, Message> {
    let suggestions = PROMPT_SUGGESTIONS.iter().map(|prompt| {
        button(text(*prompt).size(12))
            .style(button::secondary)
            .on_press(Message::SuggestionSelected(*prompt))
            .into()
    });

    column![
        text("Custom Instructions (Optional)").size(18),
        text_input(
            "Add custom instructions for the AI (e.g. 'Make the clothing fit looser'). Leave empty to use default settings.",
            value,
        )
        .on_input(Message::InstructionChanged)
        .padding(10),
        Column::with_children(suggestions).spacing(4),
    ]
    .spacing(8)
    .into()
}

/// The try-on trigger, disabled while a request runs
pub fn try_on_button<'a>(enabled: bool, loading: bool) -> Element<'a, Message> {
    let label = if loading { "Generating..." } else { "✨ Try It On!" };

    button(text(label).size(20).width(Length::Fill).align_x(Alignment::Center))
        .width(Length::Fill)
        .padding(12)
        .on_press_maybe(enabled.then_some(Message::TryOn))
        .into()
}

/// Result area: placeholder, progress, error or the generated image
pub fn result_panel<'a>(view: ResultView<'a>, image: Option<&Handle>) -> Element<'a, Message> {
    let body: Element<'a, Message> = match (view, image) {
        (ResultView::Loading, _) => centered(
            column![
                text("AI is working its magic...").size(18),
                text("This can take a moment.").size(14),
            ]
            .spacing(6)
            .align_x(Alignment::Center),
            RESULT_HEIGHT,
        ),
        (ResultView::Error(message), _) => centered(
            column![
                text("An Error Occurred").size(18).style(text::danger),
                text(message).size(14).style(text::danger),
            ]
            .spacing(6)
            .align_x(Alignment::Center),
            RESULT_HEIGHT,
        ),
        (ResultView::Image(_), Some(handle)) => Image::<Handle>::new(handle.clone())
            .content_fit(ContentFit::Contain)
            .width(Length::Fill)
            .height(Length::Fixed(RESULT_HEIGHT))
            .into(),
        (ResultView::Image(payload), None) => centered(
            text(format!("Generated image could not be displayed: {}", payload)).size(14),
            RESULT_HEIGHT,
        ),
        (ResultView::Placeholder, _) => centered(
            column![
                text("Your AI-powered virtual try-on will appear here.").size(16),
                text("Upload images and click \"Try It On!\" to start.").size(14),
            ]
            .spacing(6)
            .align_x(Alignment::Center),
            RESULT_HEIGHT,
        ),
    };

    let save = matches!(view, ResultView::Image(_)).then(|| {
        button(text("Save"))
            .style(button::secondary)
            .on_press(Message::SaveResult)
    });

    column![
        row![text("3. The Result").size(18), Space::with_width(Length::Fill)]
            .push_maybe(save)
            .align_y(Alignment::Center),
        container(body).style(container::rounded_box).padding(4),
    ]
    .spacing(8)
    .into()
}

/// Thumbnails of the most recent creations, newest first
pub fn recent_grid<'a>(recent: &[Handle]) -> Option<Element<'a, Message>> {
    if recent.is_empty() {
        return None;
    }

    let thumbnails = recent.iter().map(|handle| {
        Image::<Handle>::new(handle.clone())
            .content_fit(ContentFit::Cover)
            .width(Length::Fixed(RECENT_SIZE))
            .height(Length::Fixed(RECENT_SIZE))
            .into()
    });

    Some(
        column![
            text("Recent Creations").size(18),
            Row::with_children(thumbnails).spacing(12),
        ]
        .spacing(8)
        .into(),
    )
}

/// Camera view: live preview, errors with a retry affordance, controls
pub fn camera_panel<'a>(
    slot: Slot,
    state: &'a CameraState,
    preview: Option<&Handle>,
) -> Element<'a, Message> {
    let close = button(text("Cancel"))
        .style(button::secondary)
        .on_press(Message::CloseCamera);

    let (body, controls): (Element<'a, Message>, Element<'a, Message>) = match state {
        CameraState::Error(message) => (
            centered(
                column![
                    text("Camera Error").size(18).style(text::danger),
                    text(message.as_str()).size(14),
                ]
                .spacing(6)
                .align_x(Alignment::Center),
                RESULT_HEIGHT,
            ),
            row![button(text("Retry")).on_press(Message::RetryCamera), close]
                .spacing(12)
                .into(),
        ),
        CameraState::Live => (
            match preview {
                Some(handle) => Image::<Handle>::new(handle.clone())
                    .content_fit(ContentFit::Contain)
                    .width(Length::Fill)
                    .height(Length::Fixed(RESULT_HEIGHT))
                    .into(),
                None => centered(text("Waiting for the first frame..."), RESULT_HEIGHT),
            },
            row![
                button(text("📷 Capture Photo")).on_press(Message::CapturePhoto),
                button(text("Switch Camera"))
                    .style(button::secondary)
                    .on_press(Message::SwitchCamera),
                close,
            ]
            .spacing(12)
            .into(),
        ),
        CameraState::Requesting | CameraState::Closed => (
            centered(text("Starting camera..."), RESULT_HEIGHT),
            row![close].into(),
        ),
    };

    container(
        column![text(slot.camera_title()).size(24), body, controls]
            .spacing(16)
            .align_x(Alignment::Center)
            .max_width(900.0),
    )
    .padding(30)
    .center_x(Length::Fill)
    .into()
}

fn centered<'a>(content: impl Into<Element<'a, Message>>, height: f32) -> Element<'a, Message> {
    container(content)
        .width(Length::Fill)
        .height(Length::Fixed(height))
        .center_x(Length::Fill)
        .center_y(Length::Fixed(height))
        .into()
}
