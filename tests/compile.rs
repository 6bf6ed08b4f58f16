//! End-to-end compilation: theme definition in, archive out.

use std::fs;
use std::io::Read;

use serde_json::json;
use tempfile::tempdir;
use zip::ZipArchive;

use themepack::{
    Palette, StagingTree, StylesheetRenderer, ThemeDefinition, TransformRegistry, Variant,
    package_theme, recolor_icons, variant_color,
};

fn demo_theme() -> ThemeDefinition {
    serde_json::from_value(json!({
        "QTCOLOR_PRIMARYCOLOR": "#112233",
        "QTCOLOR_PRIMARYLIGHTCOLOR": "#223344",
        "QTCOLOR_PRIMARYDARKCOLOR": "#001122",
        "QTCOLOR_SECONDARYCOLOR": "#445566",
        "QTCOLOR_SECONDARYLIGHTCOLOR": "#556677",
        "QTCOLOR_SECONDARYDARKCOLOR": "#334455",
        "QTCOLOR_PRIMARYTEXTCOLOR": "#FFFFFF",
        "QTCOLOR_SECONDARYTEXTCOLOR": "#AAAAAA",
    }))
    .expect("theme definition")
}

const TEMPLATE: &str = "\
/* generated - do not edit */
QWidget {
    background-color: {{ QTCOLOR_PRIMARYCOLOR }};
    color: {{ QTCOLOR_PRIMARYTEXTCOLOR }};
    font-family: {{ FONT_FAMILY }};
}

QPushButton:disabled {
    color: {{ FILTER_OPACITY(QTCOLOR_PRIMARYTEXTCOLOR, 0.3) }};
}
";

#[test]
fn compiles_a_complete_theme_bundle() {
    let dir = tempdir().expect("tempdir");
    let icon_root = dir.path().join("icons");
    let output_root = dir.path().join("build");
    fs::create_dir_all(icon_root.join("actions")).expect("icon dirs");

    // One nested icon using both the placeholder and the transparency mask,
    // plus a non-SVG file that must be skipped.
    fs::write(
        icon_root.join("actions/gear.svg"),
        r##"<svg><path fill="#0000FF" stroke="#000000"/></svg>"##,
    )
    .expect("icon");
    fs::write(icon_root.join("readme.txt"), "not an icon").expect("stray file");

    let theme = demo_theme();
    theme.validate_shape().expect("valid shape");

    let palette = Palette::from_theme(&theme).expect("palette");
    let registry = TransformRegistry::builtin();

    let staging = StagingTree::prepare(&output_root).expect("staging");

    let css = StylesheetRenderer::new(&palette, &registry)
        .render(TEMPLATE)
        .expect("render");
    assert!(!css.is_empty());
    staging.write_stylesheet(&css).expect("stage stylesheet");

    let icon_count = recolor_icons(&icon_root, &theme, &staging).expect("recolor");
    assert_eq!(icon_count, 1);

    staging.write_app_theme(&palette).expect("stage app theme");

    let archive_path = package_theme(staging, &output_root, "demo").expect("package");
    assert_eq!(archive_path, output_root.join("demo.zip"));
    assert!(!output_root.join("generated").exists());

    let file = fs::File::open(&archive_path).expect("open archive");
    let mut archive = ZipArchive::new(file).expect("zip");

    // Stylesheet is present, non-empty, fully substituted and flattened.
    let mut bundled_css = String::new();
    archive
        .by_name("stylesheets.css")
        .expect("stylesheets.css entry")
        .read_to_string(&mut bundled_css)
        .expect("read css");
    assert!(bundled_css.contains("background-color: #112233;"));
    assert!(bundled_css.contains("font-family: Roboto;"));
    assert!(bundled_css.contains("rgba(255, 255, 255, 0.3)"));
    assert!(!bundled_css.contains("/*"));
    assert!(!bundled_css.contains("{{"));

    // Every variant folder holds the recolored icon with the placeholder
    // replaced by that variant's colour and black masked transparent.
    for variant in Variant::ALL {
        let entry_name = format!("icons/{}/gear.svg", variant.as_str());
        let mut svg = String::new();
        archive
            .by_name(&entry_name)
            .unwrap_or_else(|_| panic!("missing {entry_name}"))
            .read_to_string(&mut svg)
            .expect("read icon");

        let expected = variant_color(variant, &theme).expect("variant colour").hex();
        assert!(svg.contains(&expected), "{entry_name} lacks {expected}");
        assert!(!svg.contains("#0000FF"));
        assert!(!svg.contains("#0000ff"));
        assert!(svg.contains("#ffffff00"));
    }

    // The stray non-SVG never entered the bundle.
    assert!(archive.by_name("icons/primary/readme.txt").is_err());

    // The bundle records its source palette.
    let mut app_theme = String::new();
    archive
        .by_name("apptheme.json")
        .expect("apptheme.json entry")
        .read_to_string(&mut app_theme)
        .expect("read app theme");
    let recorded: serde_json::Value = serde_json::from_str(&app_theme).expect("parse app theme");
    assert_eq!(recorded["QTCOLOR_PRIMARYCOLOR"], "#112233");
    assert_eq!(recorded["QTCOLOR_DANGER"], "#DC3545");
    assert_eq!(recorded["FONT_FAMILY"], "Roboto");
    assert!(recorded.get("FOO").is_none());
}

#[test]
fn recompiling_produces_identical_bundle_contents() {
    let dir = tempdir().expect("tempdir");
    let icon_root = dir.path().join("icons");
    let output_root = dir.path().join("build");
    fs::create_dir_all(&icon_root).expect("icon root");
    fs::write(
        icon_root.join("dot.svg"),
        r##"<svg><circle fill="#0000ff"/></svg>"##,
    )
    .expect("icon");

    let theme = demo_theme();
    let palette = Palette::from_theme(&theme).expect("palette");
    let registry = TransformRegistry::builtin();

    let compile = || {
        let staging = StagingTree::prepare(&output_root).expect("staging");
        let css = StylesheetRenderer::new(&palette, &registry)
            .render(TEMPLATE)
            .expect("render");
        staging.write_stylesheet(&css).expect("stage stylesheet");
        recolor_icons(&icon_root, &theme, &staging).expect("recolor");
        staging.write_app_theme(&palette).expect("stage app theme");
        let archive = package_theme(staging, &output_root, "demo").expect("package");

        let file = fs::File::open(&archive).expect("open");
        let mut zip = ZipArchive::new(file).expect("zip");
        let mut contents = Vec::new();
        for index in 0..zip.len() {
            let mut entry = zip.by_index(index).expect("entry");
            let mut body = Vec::new();
            entry.read_to_end(&mut body).expect("read entry");
            contents.push((entry.name().to_string(), body));
        }
        contents
    };

    assert_eq!(compile(), compile());
}

#[test]
fn missing_required_key_fails_before_staging() {
    let theme: ThemeDefinition = serde_json::from_value(json!({
        "QTCOLOR_PRIMARYCOLOR": "#112233",
        "QTCOLOR_PRIMARYLIGHTCOLOR": "#223344",
        "QTCOLOR_PRIMARYDARKCOLOR": "#001122",
        "QTCOLOR_SECONDARYCOLOR": "#445566",
        "QTCOLOR_SECONDARYLIGHTCOLOR": "#556677",
        "QTCOLOR_PRIMARYTEXTCOLOR": "#FFFFFF",
        "QTCOLOR_SECONDARYTEXTCOLOR": "#AAAAAA",
    }))
    .expect("theme definition");

    theme.validate_shape().expect("subset shape is valid");
    let err = Palette::from_theme(&theme).expect_err("palette must fail");
    assert!(err.to_string().contains("QTCOLOR_SECONDARYDARKCOLOR"));
}
