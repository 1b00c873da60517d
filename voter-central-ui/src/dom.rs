//! Shell to DOM
//!
//! Copies each rendered container into the page element with the same id.
//! Nodes are created through the DOM API rather than `innerHTML` so that
//! `<script>` elements (the Twitter widget loader) execute.

use voter_central::render::{Container, Element, Node, PageShell};
use wasm_bindgen::JsValue;
use web_sys::Document;

/// Replace the children of every page element that has a container in `shell`
pub fn apply_shell(document: &Document, shell: &PageShell) -> Result<(), JsValue> {
    for container in shell.containers() {
        apply_container(document, container)?;
    }
    Ok(())
}

fn apply_container(document: &Document, container: &Container) -> Result<(), JsValue> {
    let Some(target) = document.get_element_by_id(container.id()) else {
        web_sys::console::warn_1(&format!("No element #{} on this page", container.id()).into());
        return Ok(());
    };

    target.set_inner_html("");
    for node in container.children() {
        target.append_child(&build_node(document, node)?)?;
    }
    Ok(())
}

fn build_node(document: &Document, node: &Node) -> Result<web_sys::Node, JsValue> {
    match node {
        Node::Text(text) => Ok(document.create_text_node(text).into()),
        Node::Element(element) => Ok(build_element(document, element)?.into()),
    }
}

fn build_element(document: &Document, element: &Element) -> Result<web_sys::Element, JsValue> {
    let built = document.create_element(&element.tag)?;
    for (name, value) in &element.attrs {
        built.set_attribute(name, value)?;
    }
    for child in &element.children {
        built.append_child(&build_node(document, child)?)?;
    }
    Ok(built)
}
