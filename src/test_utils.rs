//! テスト用ユーティリティ関数
//!
//! 複数のテストモジュールで使用される共通のヘルパー関数を提供します。
#![allow(clippy::expect_used)]

use serde_json::json;

use crate::dom::{
    Document,
    Element,
    NodeRegistry,
};
use crate::input::translation::table_from_json;
use crate::ir::translation::TranslationTable;
use crate::types::NodeId;

/// テスト用の翻訳テーブル（en / fr）を作成する
///
/// `hero.subtitle` は英語のみに存在する
pub(crate) fn sample_table() -> TranslationTable {
    table_from_json(&json!({
        "en": {
            "nav": { "home": "Home", "about": "About", "services": "Services" },
            "services": { "web": "Web design" },
            "hero": { "title": "Websites that work", "subtitle": "Built for growth" }
        },
        "fr": {
            "nav": { "home": "Accueil", "about": "À propos", "services": "Services" },
            "services": { "web": "Conception web" },
            "hero": { "title": "Des sites qui fonctionnent" }
        }
    }))
    .expect("sample table is valid")
}

/// テスト用ページ内の主要ノード
#[derive(Debug, Clone, Copy)]
pub(crate) struct SampleNodes {
    pub header: NodeId,
    pub navbar: NodeId,
    pub nav_home: NodeId,
    pub nav_about: NodeId,
    pub dropdown: NodeId,
    pub dropdown_trigger: NodeId,
    pub second_dropdown: NodeId,
    pub second_trigger: NodeId,
    pub en_button: NodeId,
    pub fr_button: NodeId,
    pub toggler: NodeId,
    pub overlay: NodeId,
    pub hero_title: NodeId,
    pub hero_subtitle: NodeId,
    pub untranslated: NodeId,
    pub footer_home: NodeId,
    pub contact_form: NodeId,
    pub back_top: NodeId,
    pub splash: NodeId,
}

/// テスト用のページを作成する
///
/// 初期テキストは英語（`hero.subtitle` のみ空）
pub(crate) fn sample_page() -> (NodeRegistry, SampleNodes) {
    let mut doc = NodeRegistry::new();
    let body = doc.body();

    let splash = doc.append(body, Element::new("div").attr("data-splash", "").class("splash"));

    let header = doc.append(body, Element::new("header").attr("data-header", ""));
    let navbar = doc.append(header, Element::new("nav").attr("data-navbar", ""));
    let nav_home = doc.append(
        navbar,
        Element::new("a").attr("data-nav-link", "").attr("data-i18n", "nav.home").text("Home"),
    );
    let nav_about = doc.append(
        navbar,
        Element::new("a").attr("data-nav-link", "").attr("data-i18n", "nav.about").text("About"),
    );

    let dropdown = doc.append(navbar, Element::new("div").class("modern-dropdown"));
    let dropdown_trigger = doc.append(
        dropdown,
        Element::new("a")
            .class("dropdown-trigger")
            .attr("data-i18n", "nav.services")
            .text("Services"),
    );
    let menu = doc.append(dropdown, Element::new("ul").class("modern-dropdown-menu"));
    doc.append(menu, Element::new("a").attr("data-i18n", "services.web").text("Web design"));

    let second_dropdown = doc.append(navbar, Element::new("div").class("modern-dropdown"));
    let second_trigger =
        doc.append(second_dropdown, Element::new("a").class("dropdown-trigger").text("More"));
    doc.append(second_dropdown, Element::new("ul").class("modern-dropdown-menu"));

    let en_button = doc.append(
        header,
        Element::new("button").class("lang-btn").attr("data-lang", "en").text("EN"),
    );
    let fr_button = doc.append(
        header,
        Element::new("button").class("lang-btn").attr("data-lang", "fr").text("FR"),
    );
    let toggler = doc.append(header, Element::new("button").attr("data-nav-toggler", ""));
    let overlay = doc.append(body, Element::new("div").attr("data-overlay", ""));

    let main = doc.append(body, Element::new("main"));
    let hero_title = doc.append(
        main,
        Element::new("h1").attr("data-i18n", "hero.title").text("Websites that work"),
    );
    let hero_subtitle = doc.append(main, Element::new("p").attr("data-i18n", "hero.subtitle"));
    let untranslated = doc.append(
        main,
        Element::new("p").attr("data-i18n", "hero.tagline").text("Placeholder tagline"),
    );

    let section = doc.append(main, Element::new("section"));
    let contact_form = doc.append(section, Element::new("form").attr("id", "contactForm"));
    for field in ["name", "email", "subject", "message"] {
        doc.append(contact_form, Element::new("input").attr("name", field).attr("value", ""));
    }

    let footer = doc.append(body, Element::new("footer"));
    let footer_home =
        doc.append(footer, Element::new("a").attr("data-i18n", "nav.home").text("Home"));
    let back_top = doc.append(body, Element::new("a").attr("data-back-top-btn", ""));

    let nodes = SampleNodes {
        header,
        navbar,
        nav_home,
        nav_about,
        dropdown,
        dropdown_trigger,
        second_dropdown,
        second_trigger,
        en_button,
        fr_button,
        toggler,
        overlay,
        hero_title,
        hero_subtitle,
        untranslated,
        footer_home,
        contact_form,
        back_top,
        splash,
    };
    (doc, nodes)
}
