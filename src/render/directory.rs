//! Directory View
//!
//! Renders the election listing. Each election has the structure:
//!
//! ```text
//! <div id="election-1">
//!   <h3>Election name</h3>
//!   <time datetime="2020-11-03">Election date</time>
//!   <div id="election-1-positions">
//!     <ul>
//!       <li>
//!         <h4>Position 1: Mayor</h4>
//!         <p>Table of Candidates</p>
//!         <table class="candidates-table">
//!           <thead><tr><th>Candidate Name</th><th>Party Affiliation</th><th>Incumbent</th></tr></thead>
//!           <tbody>
//!             <tr><td><a href="candidate.html?candidateId=1&electionName=...">Name</a></td><td>Party</td><td>Yes</td></tr>
//!           </tbody>
//!         </table>
//!       </li>
//!     </ul>
//!   </div>
//!   <hr>
//! </div>
//! ```

use crate::api::{Candidate, CandidateId, DirectoryResponse, Election, Position};
use crate::config::RenderConfig;
use crate::query::{DirectoryQuery, StateFilter, STATES};
use crate::render::container::{ids, PageShell};
use crate::render::dates::iso_date;
use crate::render::error::RenderResult;
use crate::render::node::{Element, Node};

/// Shown in the alert element when the listing is empty and the backend
/// gave no alert of its own
pub const NO_ELECTIONS_MESSAGE: &str = "No upcoming elections were found for this address.";

/// Everything the directory page displays for one response
#[derive(Debug, Clone, PartialEq)]
pub struct DirectoryView {
    pub elections: Vec<Election>,
    pub alert: Option<String>,
    /// Dropdown selection, present only when listing all elections
    pub state_filter: Option<StateFilter>,
}

impl DirectoryView {
    pub fn new(response: DirectoryResponse, query: &DirectoryQuery) -> Self {
        let alert = response
            .alert
            .filter(|alert| !alert.trim().is_empty())
            .or_else(|| {
                response
                    .elections_data
                    .is_empty()
                    .then(|| NO_ELECTIONS_MESSAGE.to_string())
            });

        Self {
            elections: response.elections_data,
            alert,
            state_filter: query
                .list_all_elections
                .then(|| query.state_filter.clone()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.elections.is_empty()
    }

    /// Write the view into the directory shell, replacing what was there
    pub fn apply(&self, shell: &mut PageShell, config: &RenderConfig) -> RenderResult<()> {
        shell
            .container_mut(ids::ELECTIONS)?
            .replace_children(render_elections(&self.elections, config));

        shell
            .container_mut(ids::ELECTION_NAV)?
            .replace_children(render_election_nav(&self.elections));

        let filter = match &self.state_filter {
            Some(selected) => render_state_filter(selected),
            None => Vec::new(),
        };
        shell.container_mut(ids::STATE_FILTER)?.replace_children(filter);

        shell
            .container_mut(ids::ALERT)?
            .set_text(self.alert.as_deref().unwrap_or_default());

        Ok(())
    }
}

/// One top-level node per election, in response order
pub fn render_elections(elections: &[Election], config: &RenderConfig) -> Vec<Node> {
    elections
        .iter()
        .enumerate()
        .map(|(index, election)| render_election(election, index, config).into())
        .collect()
}

fn render_election(election: &Election, index: usize, config: &RenderConfig) -> Element {
    let element_id = election_element_id(index);

    let mut date = Element::new("time").text(election.date.as_str());
    if let Some(iso) = iso_date(&election.date) {
        date = date.attr("datetime", iso);
    }

    let positions = Element::new("div")
        .id(format!("{}-positions", element_id))
        .child(render_positions(&election.positions, &election.name, config));

    Element::new("div")
        .id(element_id)
        .class("election")
        .child(Element::new("h3").text(election.name.as_str()))
        .child(date)
        .child(positions)
        .child(Element::new("hr"))
}

fn render_positions(positions: &[Position], election_name: &str, config: &RenderConfig) -> Element {
    Element::new("ul").children(
        positions
            .iter()
            .enumerate()
            .map(|(index, position)| render_position(position, index, election_name, config)),
    )
}

fn render_position(
    position: &Position,
    index: usize,
    election_name: &str,
    config: &RenderConfig,
) -> Element {
    Element::new("li")
        .child(Element::new("h4").text(format!("Position {}: {}", index + 1, position.name)))
        .child(Element::new("p").text("Table of Candidates"))
        .child(render_candidate_table(&position.candidates, election_name, config))
}

fn render_candidate_table(
    candidates: &[Candidate],
    election_name: &str,
    config: &RenderConfig,
) -> Element {
    let header = Element::new("tr")
        .child(Element::new("th").text("Candidate Name"))
        .child(Element::new("th").text("Party Affiliation"))
        .child(Element::new("th").text("Incumbent"));

    let rows = candidates
        .iter()
        .map(|candidate| render_candidate_row(candidate, election_name, config));

    Element::new("table")
        .class("candidates-table")
        .child(Element::new("thead").child(header))
        .child(Element::new("tbody").children(rows))
}

fn render_candidate_row(candidate: &Candidate, election_name: &str, config: &RenderConfig) -> Element {
    let href = candidate_href(&config.candidate_page, &candidate.id, Some(election_name));

    Element::new("tr")
        .child(
            Element::new("td").child(
                Element::new("a")
                    .attr("href", href)
                    .text(candidate.name.as_str()),
            ),
        )
        .child(Element::new("td").text(candidate.party_affiliation.as_str()))
        .child(Element::new("td").text(if candidate.incumbency { "Yes" } else { "No" }))
}

/// Link to a candidate's detail page. The election name is appended when
/// known so the detail page can scope its request.
pub fn candidate_href(page: &str, id: &CandidateId, election_name: Option<&str>) -> String {
    let mut href = format!("{}?candidateId={}", page, urlencoding::encode(id.as_str()));
    if let Some(name) = election_name.filter(|n| !n.trim().is_empty()) {
        href.push_str("&electionName=");
        href.push_str(&urlencoding::encode(name));
    }
    href
}

/// Quick links from the navigation bar to each election block
pub fn render_election_nav(elections: &[Election]) -> Vec<Node> {
    elections
        .iter()
        .enumerate()
        .map(|(index, election)| {
            Element::new("a")
                .class("nav-link")
                .attr("href", format!("#{}", election_element_id(index)))
                .text(election.name.as_str())
                .into()
        })
        .collect()
}

/// State dropdown with the active filter selected
pub fn render_state_filter(selected: &StateFilter) -> Vec<Node> {
    let options = STATES.iter().map(|state| {
        let option = Element::new("option").attr("value", *state).text(*state);
        if *state == selected.as_str() {
            option.attr("selected", "selected")
        } else {
            option
        }
    });

    vec![Element::new("label")
        .text("Filter by state: ")
        .child(Element::new("select").attr("name", "stateFilter").children(options))
        .into()]
}

fn election_element_id(index: usize) -> String {
    format!("election-{}", index + 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn response(body: serde_json::Value) -> DirectoryResponse {
        serde_json::from_value(body).unwrap()
    }

    fn sample() -> DirectoryResponse {
        response(json!({
            "electionsData": [
                {
                    "name": "General",
                    "date": "2020-11-03",
                    "positions": [
                        {"name": "Mayor", "candidates": [
                            {"id": 1, "name": "A. Smith", "partyAffiliation": "Ind.", "incumbency": "Yes"},
                            {"id": 2, "name": "B. Jones", "partyAffiliation": "Dem.", "incumbency": "No"}
                        ]},
                        {"name": "Sheriff", "candidates": [
                            {"id": 3, "name": "C. Brown", "partyAffiliation": "Rep.", "incumbency": false}
                        ]}
                    ]
                },
                {"name": "Runoff", "date": "Dec 1, 2020", "positions": []}
            ]
        }))
    }

    fn body_rows(election: &Element) -> usize {
        election
            .find_all("tbody")
            .iter()
            .map(|tbody| tbody.find_all("tr").len())
            .sum()
    }

    #[test]
    fn test_one_block_per_election_in_order() {
        let config = RenderConfig::default();
        let response = sample();
        let nodes = render_elections(&response.elections_data, &config);

        assert_eq!(nodes.len(), 2);
        let first = nodes[0].as_element().unwrap();
        let second = nodes[1].as_element().unwrap();
        assert_eq!(first.element_id(), Some("election-1"));
        assert_eq!(second.element_id(), Some("election-2"));
        assert_eq!(first.find_all("h3")[0].text_content(), "General");
        assert_eq!(second.find_all("h3")[0].text_content(), "Runoff");
    }

    #[test]
    fn test_one_row_per_candidate_in_order() {
        let config = RenderConfig::default();
        let response = sample();
        let nodes = render_elections(&response.elections_data, &config);
        let first = nodes[0].as_element().unwrap();

        assert_eq!(body_rows(first), 3);
        let names: Vec<String> = first.find_all("a").iter().map(|a| a.text_content()).collect();
        assert_eq!(names, vec!["A. Smith", "B. Jones", "C. Brown"]);

        let headings: Vec<String> = first.find_all("h4").iter().map(|h| h.text_content()).collect();
        assert_eq!(headings, vec!["Position 1: Mayor", "Position 2: Sheriff"]);

        let cells: Vec<String> = first.find_all("td").iter().map(|td| td.text_content()).collect();
        assert_eq!(&cells[..3], &["A. Smith", "Ind.", "Yes"]);
        assert_eq!(&cells[6..], &["C. Brown", "Rep.", "No"]);

        let second = nodes[1].as_element().unwrap();
        assert_eq!(body_rows(second), 0);
    }

    #[test]
    fn test_candidate_link() {
        let config = RenderConfig::default();
        let response = sample();
        let nodes = render_elections(&response.elections_data, &config);
        let link = nodes[0].as_element().unwrap().find_all("a")[0].clone();

        assert_eq!(
            link.get_attr("href"),
            Some("candidate.html?candidateId=1&electionName=General")
        );
    }

    #[test]
    fn test_candidate_href_encoding() {
        let id = CandidateId::from("a b");
        assert_eq!(
            candidate_href("candidate.html", &id, Some("Special & Recall")),
            "candidate.html?candidateId=a%20b&electionName=Special%20%26%20Recall"
        );
        assert_eq!(
            candidate_href("candidate.html", &CandidateId::from(1u64), Some(" ")),
            "candidate.html?candidateId=1"
        );
    }

    #[test]
    fn test_date_attribute() {
        let config = RenderConfig::default();
        let response = sample();
        let nodes = render_elections(&response.elections_data, &config);

        let time = nodes[1].as_element().unwrap().find_all("time")[0].clone();
        assert_eq!(time.text_content(), "Dec 1, 2020");
        assert_eq!(time.get_attr("datetime"), Some("2020-12-01"));
    }

    #[test]
    fn test_empty_listing() {
        let config = RenderConfig::default();
        assert!(render_elections(&[], &config).is_empty());

        let mut shell = PageShell::directory();
        let view = DirectoryView::new(DirectoryResponse::default(), &DirectoryQuery::for_address("x"));
        view.apply(&mut shell, &config).unwrap();

        assert!(shell.container(ids::ELECTIONS).unwrap().is_empty());
        assert_eq!(
            shell.container(ids::ALERT).unwrap().text_content(),
            NO_ELECTIONS_MESSAGE
        );
    }

    #[test]
    fn test_backend_alert_wins() {
        let config = RenderConfig::default();
        let mut shell = PageShell::directory();
        let view = DirectoryView::new(
            response(json!({"electionsData": [], "alert": "Address too vague"})),
            &DirectoryQuery::for_address("x"),
        );
        view.apply(&mut shell, &config).unwrap();

        assert_eq!(shell.container(ids::ALERT).unwrap().text_content(), "Address too vague");
    }

    #[test]
    fn test_rerender_replaces_everything() {
        let config = RenderConfig::default();
        let mut shell = PageShell::directory();
        let query = DirectoryQuery::for_address("x");

        DirectoryView::new(sample(), &query).apply(&mut shell, &config).unwrap();
        assert_eq!(shell.container(ids::ELECTIONS).unwrap().children().len(), 2);

        let next = response(json!({"electionsData": [{"name": "Special", "date": "", "positions": []}]}));
        DirectoryView::new(next, &query).apply(&mut shell, &config).unwrap();

        let elections = shell.container(ids::ELECTIONS).unwrap();
        assert_eq!(elections.children().len(), 1);
        assert!(!elections.inner_html().contains("General"));
        assert!(!elections.inner_html().contains("A. Smith"));
        assert!(shell.container(ids::ALERT).unwrap().is_empty());
        assert_eq!(shell.container(ids::ELECTION_NAV).unwrap().children().len(), 1);
    }

    #[test]
    fn test_state_filter_only_when_listing_all() {
        let config = RenderConfig::default();

        let mut shell = PageShell::directory();
        DirectoryView::new(sample(), &DirectoryQuery::for_address("x"))
            .apply(&mut shell, &config)
            .unwrap();
        assert!(shell.container(ids::STATE_FILTER).unwrap().is_empty());

        let query = DirectoryQuery::all_elections().with_state_filter(StateFilter::State("CA".into()));
        DirectoryView::new(sample(), &query).apply(&mut shell, &config).unwrap();

        let filter = shell.container(ids::STATE_FILTER).unwrap();
        let label = filter.child_elements().next().unwrap();
        let options = label.find_all("option");
        assert_eq!(options.len(), STATES.len());
        let selected: Vec<_> = options
            .iter()
            .filter(|o| o.get_attr("selected").is_some())
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].get_attr("value"), Some("CA"));
    }

    #[test]
    fn test_election_nav_links() {
        let response = sample();
        let nav = render_election_nav(&response.elections_data);
        let hrefs: Vec<_> = nav
            .iter()
            .filter_map(|n| n.as_element())
            .map(|a| a.get_attr("href").unwrap().to_string())
            .collect();
        assert_eq!(hrefs, vec!["#election-1", "#election-2"]);
    }
}
