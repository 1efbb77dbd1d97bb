//! End-to-end tests through the public API: scaffold a project, edit it, and
//! check the generated pages on disk.

use multilang_gen::context::{LinkSet, build_context};
use multilang_gen::langs::{LanguageData, load_index};
use multilang_gen::{GenerateError, GenerateOptions, Manifest, generate, initialize};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const NAV_TEMPLATE: &str = "{{ lang.code }}:{% for l in lang_links %}{{ l.code }}={{ l.url }}{% if l.current %}*{% endif %};{% endfor %}";

fn scaffold() -> TempDir {
    let tmp = TempDir::new().unwrap();
    initialize(tmp.path()).unwrap();
    tmp
}

fn add_french(project: &Path) {
    fs::write(
        project.join("langs/index.json"),
        r#"[
            {"code": "zh", "name": "中文", "displayName": "中文", "file": "zh-CN.json"},
            {"code": "en", "name": "English", "displayName": "English", "file": "en-US.json"},
            {"code": "fr", "name": "Français", "displayName": "Français", "file": "fr-FR.json"}
        ]"#,
    )
    .unwrap();
    fs::write(project.join("langs/fr-FR.json"), r#"{"title": "Mon site"}"#).unwrap();
}

fn outputs(project: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(project.join("outputs"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn every_language_gets_a_page_at_its_pattern_path() {
    let tmp = scaffold();
    add_french(tmp.path());
    let options = GenerateOptions::default().with_output_pattern("site-{lang}.html");

    let report = generate(tmp.path(), &options).unwrap();

    assert_eq!(report.pages.len(), 3);
    for page in &report.pages {
        let expected = tmp.path().join("outputs").join(format!("site-{}.html", page.code));
        assert_eq!(page.path, expected);
        assert!(expected.is_file());
    }
    assert_eq!(outputs(tmp.path()), vec!["site-en.html", "site-fr.html", "site-zh.html"]);
}

#[test]
fn navigation_is_identical_apart_from_current_marker() {
    let tmp = scaffold();
    add_french(tmp.path());
    fs::write(tmp.path().join("index.tmpl"), NAV_TEMPLATE).unwrap();

    generate(tmp.path(), &GenerateOptions::default()).unwrap();

    let read = |code: &str| {
        fs::read_to_string(tmp.path().join(format!("outputs/{code}.html"))).unwrap()
    };
    assert_eq!(read("zh"), "zh:zh=zh.html*;en=en.html;fr=fr.html;");
    assert_eq!(read("en"), "en:zh=zh.html;en=en.html*;fr=fr.html;");
    assert_eq!(read("fr"), "fr:zh=zh.html;en=en.html;fr=fr.html*;");
}

#[test]
fn filtered_run_links_only_selected_languages() {
    let tmp = scaffold();
    add_french(tmp.path());
    fs::write(tmp.path().join("index.tmpl"), NAV_TEMPLATE).unwrap();
    let options = GenerateOptions::default().with_lang_codes(["fr", "zh"]);

    let report = generate(tmp.path(), &options).unwrap();

    let order: Vec<_> = report.pages.iter().map(|p| p.code.as_str()).collect();
    assert_eq!(order, vec!["zh", "fr"]);
    assert_eq!(outputs(tmp.path()), vec!["fr.html", "zh.html"]);
    let zh = fs::read_to_string(tmp.path().join("outputs/zh.html")).unwrap();
    assert_eq!(zh, "zh:zh=zh.html*;fr=fr.html;");
}

#[test]
fn unknown_codes_are_all_reported() {
    let tmp = scaffold();
    let options = GenerateOptions::default().with_lang_codes(["zh", "xx", "yy"]);

    let err = generate(tmp.path(), &options).unwrap_err();

    assert!(matches!(err, GenerateError::Filter(_)));
    let msg = err.to_string();
    assert!(msg.contains("xx"), "{msg}");
    assert!(msg.contains("yy"), "{msg}");
    assert!(!tmp.path().join("outputs").exists());
}

#[test]
fn missing_manifest_still_generates_with_defaults() {
    let tmp = scaffold();
    fs::remove_file(tmp.path().join("manifest.json")).unwrap();
    fs::write(
        tmp.path().join("index.tmpl"),
        "{{ base.siteName }}/{{ base.version }}/{{ base.baseURL }}/{{ base.author }}/{{ base.description }}",
    )
    .unwrap();

    generate(tmp.path(), &GenerateOptions::default()).unwrap();

    let zh = fs::read_to_string(tmp.path().join("outputs/zh.html")).unwrap();
    assert_eq!(zh, "Website/1.0.0///");
}

#[test]
fn serialized_data_matches_structured_data() {
    let tmp = scaffold();
    let languages = load_index(&tmp.path().join("langs/index.json")).unwrap();
    let links = LinkSet::new(&languages, "{lang}.html");

    for language in &languages {
        let ctx = build_context(language, &links, &tmp.path().join("langs"), &Manifest::default())
            .unwrap();
        let reparsed: LanguageData = serde_json::from_str(&ctx.i18n_json).unwrap();
        assert_eq!(reparsed, ctx.i18n);
        assert_eq!(ctx.lang_links.iter().filter(|l| l.current).count(), 1);
        assert!(ctx.lang.current);
    }
}

#[test]
fn embedded_json_is_not_escaped() {
    let tmp = scaffold();
    fs::write(tmp.path().join("index.tmpl"), "{{ i18n_json }}").unwrap();
    generate(tmp.path(), &GenerateOptions::default()).unwrap();

    let en = fs::read_to_string(tmp.path().join("outputs/en.html")).unwrap();
    let value: serde_json::Value = serde_json::from_str(&en).unwrap();
    assert_eq!(value["title"], "My Website");
}

#[test]
fn language_data_cannot_break_out_of_script_block() {
    let tmp = scaffold();
    fs::write(
        tmp.path().join("langs/en-US.json"),
        r#"{"title": "</script><script>alert(1)</script>"}"#,
    )
    .unwrap();

    generate(tmp.path(), &GenerateOptions::default()).unwrap();

    let en = fs::read_to_string(tmp.path().join("outputs/en.html")).unwrap();
    assert!(!en.contains("<script>alert(1)"), "{en}");
    assert_eq!(en.matches("</script>").count(), 1);
    assert!(en.contains(r#"window.I18N = {"title":"\u003c/script\u003e"#));
}

#[test]
fn fixed_output_name_is_rejected_for_several_languages() {
    let tmp = scaffold();
    let options = GenerateOptions::default().with_output_pattern("index.html");

    let err = generate(tmp.path(), &options).unwrap_err();

    assert!(matches!(err, GenerateError::OutputPattern(_)));
    assert!(!tmp.path().join("outputs").exists());
}

#[test]
fn rerun_overwrites_previous_output() {
    let tmp = scaffold();
    fs::write(tmp.path().join("index.tmpl"), "first {{ lang.code }}").unwrap();
    generate(tmp.path(), &GenerateOptions::default()).unwrap();
    fs::write(tmp.path().join("index.tmpl"), "2nd").unwrap();
    generate(tmp.path(), &GenerateOptions::default()).unwrap();

    assert_eq!(fs::read_to_string(tmp.path().join("outputs/zh.html")).unwrap(), "2nd");
}
