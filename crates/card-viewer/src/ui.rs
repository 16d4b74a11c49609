//! egui overlay: the "Card Maker" control panel.

use crate::assets::TextureKind;
use card_shading::Rarity;

/// Image types offered by the photo picker.
pub const PHOTO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "bmp", "gif"];

/// What the panel shows about each texture slot.
pub struct TextureStatus {
    pub kind: TextureKind,
    /// File name of the image currently shown or being loaded.
    pub name: String,
    pub loading: bool,
    pub loaded: bool,
}

/// What the user asked for this frame.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CardMakerResponse {
    pub rarity_changed: bool,
    pub choose_photo: bool,
}

/// Draws the control panel.
pub fn draw_card_maker(
    ctx: &egui::Context,
    rarity: &mut Rarity,
    textures: &[TextureStatus],
) -> CardMakerResponse {
    let mut response = CardMakerResponse::default();

    egui::Window::new("Card Maker")
        .anchor(egui::Align2::LEFT_TOP, [20.0, 20.0])
        .resizable(false)
        .collapsible(false)
        .show(ctx, |ui| {
            ui.strong("Photo");
            if let Some(base) = textures.iter().find(|t| t.kind == TextureKind::Base) {
                ui.label(base.name.as_str());
            }
            if ui.button("Choose photo…").clicked() {
                response.choose_photo = true;
            }
            ui.small("Or drop an image onto the window.");

            ui.add_space(10.0);
            ui.strong("Rarity");
            ui.horizontal(|ui| {
                for tier in Rarity::ALL {
                    if ui.selectable_label(*rarity == tier, tier.label()).clicked() && *rarity != tier {
                        *rarity = tier;
                        response.rarity_changed = true;
                    }
                }
            });

            // Only surface slots that are not showing an image yet.
            for status in textures.iter().filter(|t| t.loading || !t.loaded) {
                ui.add_space(4.0);
                let state = if status.loading { "loading" } else { "missing" };
                ui.weak(format!("{} texture {}: {}", status.kind.label(), state, status.name));
            }
        });

    response
}

/// Opens the native picker for a new card photo.
pub fn pick_photo() -> Option<std::path::PathBuf> {
    rfd::FileDialog::new()
        .set_title("Choose photo")
        .add_filter("Images", PHOTO_EXTENSIONS)
        .add_filter("All Files", &["*"])
        .pick_file()
}
