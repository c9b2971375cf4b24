use egui::{Color32, FontFamily, FontId, TextStyle, Visuals};

/// Configura a aparência da aplicação
pub fn configure_style(ctx: &egui::Context, dark_mode: bool) {
    let mut style = (*ctx.style()).clone();

    // Tipografia
    style.text_styles = [
        (TextStyle::Heading, FontId::new(24.0, FontFamily::Proportional)),
        (TextStyle::Name("heading2".into()), FontId::new(20.0, FontFamily::Proportional)),
        (TextStyle::Name("heading3".into()), FontId::new(16.0, FontFamily::Proportional)),
        (TextStyle::Body, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Monospace, FontId::new(13.0, FontFamily::Monospace)),
        (TextStyle::Button, FontId::new(14.0, FontFamily::Proportional)),
        (TextStyle::Small, FontId::new(12.0, FontFamily::Proportional)),
    ]
    .into();

    // Espaçamento
    style.spacing.item_spacing = egui::vec2(8.0, 6.0);
    style.spacing.button_padding = egui::vec2(12.0, 6.0);
    style.spacing.window_margin = egui::Margin::same(12.0);

    if dark_mode {
        style.visuals = dark_visuals();
    } else {
        style.visuals = light_visuals();
    }

    ctx.set_style(style);
}

fn dark_visuals() -> Visuals {
    let mut visuals = Visuals::dark();

    visuals.panel_fill = Color32::from_rgb(23, 28, 42);
    visuals.window_fill = Color32::from_rgb(30, 36, 54);
    visuals.extreme_bg_color = Color32::from_rgb(16, 20, 32);

    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(36, 43, 62);
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(42, 50, 72);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(52, 62, 90);
    visuals.widgets.active.bg_fill = Color32::from_rgb(62, 74, 108);

    // Acento institucional (azul)
    visuals.selection.bg_fill = Color32::from_rgb(50, 90, 190);
    visuals.hyperlink_color = Color32::from_rgb(120, 160, 255);

    visuals
}

fn light_visuals() -> Visuals {
    let mut visuals = Visuals::light();

    visuals.panel_fill = Color32::from_rgb(248, 249, 252);
    visuals.window_fill = Color32::from_rgb(255, 255, 255);
    visuals.extreme_bg_color = Color32::from_rgb(241, 243, 248);

    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(235, 238, 244);
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(230, 233, 240);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(219, 226, 240);
    visuals.widgets.active.bg_fill = Color32::from_rgb(199, 210, 235);

    visuals.selection.bg_fill = Color32::from_rgb(180, 205, 255);
    visuals.hyperlink_color = Color32::from_rgb(30, 58, 138);

    visuals
}

/// Paleta institucional do Oficina Sapiens
pub struct Colors;

impl Colors {
    // Azul institucional
    pub const PRIMARY: Color32 = Color32::from_rgb(30, 58, 138);
    pub const PRIMARY_HOVER: Color32 = Color32::from_rgb(30, 64, 175);

    // Vermelho de destaque
    pub const ACCENT: Color32 = Color32::from_rgb(220, 38, 38);

    // Dourado (troféus e destaques de ranking)
    pub const GOLD: Color32 = Color32::from_rgb(234, 179, 8);

    pub const SUCCESS: Color32 = Color32::from_rgb(34, 197, 94);
    pub const SUCCESS_BG: Color32 = Color32::from_rgb(220, 252, 231);

    pub const WARNING: Color32 = Color32::from_rgb(234, 179, 8);
    pub const WARNING_BG: Color32 = Color32::from_rgb(254, 249, 195);

    pub const ERROR: Color32 = Color32::from_rgb(239, 68, 68);
    pub const ERROR_BG: Color32 = Color32::from_rgb(254, 226, 226);

    pub const INFO: Color32 = Color32::from_rgb(59, 130, 246);
    pub const INFO_BG: Color32 = Color32::from_rgb(219, 234, 254);

    pub const TEXT_PRIMARY: Color32 = Color32::from_rgb(17, 24, 39);
    pub const TEXT_SECONDARY: Color32 = Color32::from_rgb(107, 114, 128);
    pub const TEXT_MUTED: Color32 = Color32::from_rgb(156, 163, 175);
}

/// Ícones (Unicode)
pub struct Icons;

impl Icons {
    pub const TROPHY: &'static str = "🏆";
    pub const SCHOOL: &'static str = "🏫";
    pub const PEOPLE: &'static str = "👥";
    pub const PERSON: &'static str = "👤";
    pub const BELL: &'static str = "🔔";
    pub const LOCK: &'static str = "🔒";
    pub const UNLOCK: &'static str = "🔓";
    pub const KEY: &'static str = "🔑";
    pub const SEARCH: &'static str = "🔍";
    pub const SETTINGS: &'static str = "⚙";
    pub const ADD: &'static str = "➕";
    pub const EDIT: &'static str = "✏";
    pub const DELETE: &'static str = "🗑";
    pub const SAVE: &'static str = "💾";
    pub const CHECK: &'static str = "✓";
    pub const CROSS: &'static str = "✗";
    pub const CALENDAR: &'static str = "📅";
    pub const NOTE: &'static str = "📝";
    pub const CHART: &'static str = "📊";
    pub const DOCUMENT: &'static str = "📄";
    pub const EXPORT: &'static str = "📤";
    pub const EXIT: &'static str = "🚪";
    pub const WARNING: &'static str = "⚠";
    pub const LINK: &'static str = "🔗";
    pub const MAIL: &'static str = "✉";
}
