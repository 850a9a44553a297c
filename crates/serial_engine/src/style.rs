/// Canonical color classes emitted by the extractor and their reading colors.
pub const COLOR_PALETTE: &[(&str, &str)] = &[
    ("red", "#e74c3c"),
    ("blue", "#3498db"),
    ("green", "#27ae60"),
    ("purple", "#9b59b6"),
    ("orange", "#e67e22"),
    ("yellow", "#f1c40f"),
    ("brown", "#8b4513"),
    ("pink", "#e91e63"),
    ("cyan", "#1abc9c"),
    ("gray", "#7f8c8d"),
    ("gold", "#ffd700"),
    ("silver", "#c0c0c0"),
    ("crimson", "#dc143c"),
    ("maroon", "#800000"),
    ("navy", "#000080"),
    ("teal", "#008080"),
];

const BASE_STYLESHEET: &str = "\
body {
\tfont-family: Georgia, serif;
\tline-height: 1.6;
\tcolor: #333;
}
h1 {
\tcolor: #2c3e50;
\ttext-align: center;
\tborder-bottom: 2px solid #3498db;
\tpadding-bottom: 10px;
}
p {
\tmargin-bottom: 1em;
\ttext-align: justify;
}
";

/// Reading stylesheet bundled into every book.
pub fn default_stylesheet() -> String {
    let mut css = String::from(BASE_STYLESHEET);
    for (class, color) in COLOR_PALETTE {
        css.push_str(&format!(".{class} {{ color: {color}; }}\n"));
    }
    css
}
