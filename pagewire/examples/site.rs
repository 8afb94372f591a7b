//! Wires both controllers onto a representative page and simulates a short
//! browsing session, advancing time manually instead of sleeping.

use std::time::{Duration, Instant};

use pagedom::{Document, DomEvent, Node};
use pagewire::{AccordionController, NavigationController, PageRuntime, Toolkit};
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn build_page() -> Document {
    let mut doc = Document::new();
    let root = doc.root();

    // Header slider with three slides, first one showing.
    let header = doc.append(root, Node::new("div").id("header"));
    let slider = doc.append(header, Node::new("ul").id("header_image_slider"));
    doc.append(slider, Node::new("li").id("slide-0"));
    doc.append(slider, Node::new("li").id("slide-1").hidden());
    doc.append(slider, Node::new("li").id("slide-2").hidden());

    // Main menu with one submenu-bearing item, plus the mobile trigger.
    let nav = doc.append(root, Node::new("nav").id("menu_principal_container"));
    let menu = doc.append(nav, Node::new("ul"));
    let item = doc.append(
        menu,
        Node::new("li").id("item-about").class("menu-item-has-children"),
    );
    doc.append(item, Node::new("a").attr("href", "/about"));
    let submenu = doc.append(item, Node::new("ul").class("sub-menu").hidden());
    doc.append(submenu, Node::new("li"));
    doc.append(root, Node::new("a").class("menu_trigger").attr("href", "#"));

    // Mobile search: trigger plus its hidden sibling form.
    let search = doc.append(root, Node::new("div").class("search_box"));
    doc.append(search, Node::new("a").class("search_trigger").attr("href", "#"));
    doc.append(search, Node::new("form").hidden());

    // Two accordion panels, the first open.
    let group = doc.append(root, Node::new("div").class("panel-group"));
    for (index, open) in [(1, true), (2, false)] {
        let panel = doc.append(group, Node::new("div").class("panel"));
        let heading = doc.append(panel, Node::new("div").class("panel-heading"));
        let title = doc.append(heading, Node::new("h4").class("panel-title"));
        let link = Node::new("a").attr("href", format!("#collapse{index}"));
        let link = if open { link } else { link.class("collapsed") };
        doc.append(title, link);
        let body = Node::new("div")
            .id(format!("collapse{index}"))
            .class("panel-collapse");
        let body = if open { body } else { body.hidden() };
        doc.append(panel, body);
    }

    doc
}

fn main() {
    TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .expect("Failed to initialize logger");

    let t0 = Instant::now();
    let mut rt = PageRuntime::new(build_page(), Toolkit::with_collapse(), t0);

    AccordionController::install(&mut rt);
    let mut nav = NavigationController::install(&mut rt, t0);

    // Open the second accordion panel.
    let link = rt.state.doc.select(".panel-title > a").expect("selector")[1];
    rt.emit(DomEvent::Click { target: link }, t0);
    rt.update(t0 + Duration::from_millis(400));
    let body = rt.state.doc.get_element_by_id("collapse2").expect("panel");
    println!("collapse2 visible: {}", rt.state.doc.is_visible(body));

    // Hover the submenu item, then leave before the fade-in completes.
    let item = rt.state.doc.get_element_by_id("item-about").expect("item");
    rt.emit(DomEvent::PointerEnter { target: item }, t0 + Duration::from_millis(500));
    rt.emit(DomEvent::PointerLeave { target: item }, t0 + Duration::from_millis(600));
    rt.update(t0 + Duration::from_millis(900));

    // Toggle the mobile menu open and closed again.
    let trigger = rt.state.doc.select(".menu_trigger").expect("selector")[0];
    rt.emit(DomEvent::Click { target: trigger }, t0 + Duration::from_secs(1));
    rt.emit(DomEvent::Click { target: trigger }, t0 + Duration::from_secs(2));

    // Let the slider wrap all the way around.
    for tick in 1..=3u64 {
        let at = t0 + Duration::from_secs(5 * tick) + Duration::from_millis(600);
        rt.update(at);
    }
    rt.update(t0 + Duration::from_millis(16_200));
    let slide0 = rt.state.doc.get_element_by_id("slide-0").expect("slide");
    println!("slide-0 visible after full cycle: {}", rt.state.doc.is_visible(slide0));

    nav.teardown(&mut rt);
    println!("navigations performed: {:?}", rt.navigations());
}
