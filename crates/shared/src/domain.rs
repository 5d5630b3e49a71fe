use serde::{Deserialize, Serialize};

/// One entry in the resume's project history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub title: String,
    pub description: String,
    pub start_date: String,
    pub end_date: String,
}

/// The structured resume document returned by the lookup service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resume {
    pub name: String,
    pub skills: Vec<String>,
    pub projects: Vec<Project>,
    pub address: String,
    pub email: String,
    pub phone: String,
    pub summary: String,
    pub twitter: String,
}

/// Opaque display color carried through customization state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgba {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Rgba {
    pub const BLACK: Rgba = Rgba::from_rgb(0x00, 0x00, 0x00);
    pub const WHITE: Rgba = Rgba::from_rgb(0xFF, 0xFF, 0xFF);
    /// Light cyan used as the stock viewer background.
    pub const LIGHT_CYAN: Rgba = Rgba::from_rgb(0xE0, 0xF7, 0xFA);

    pub const fn from_rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 0xFF }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn project_dates_use_camel_case_on_the_wire() {
        let project: Project = serde_json::from_str(
            r#"{
                "title": "VirusCheck",
                "description": "Scan files and URLs for potential threats.",
                "startDate": "2023-01",
                "endDate": "2023-06"
            }"#,
        )
        .expect("project json");

        assert_eq!(project.start_date, "2023-01");
        assert_eq!(project.end_date, "2023-06");

        let json = serde_json::to_value(&project).expect("serialize");
        assert!(json.get("startDate").is_some());
        assert!(json.get("start_date").is_none());
    }

    #[test]
    fn resume_round_trips_all_fields() {
        let resume = Resume {
            name: "Jane Doe".into(),
            skills: vec!["Rust".into(), "Distributed systems".into()],
            projects: vec![Project {
                title: "Portfolio App".into(),
                description: "A personal portfolio.".into(),
                start_date: "2022-03".into(),
                end_date: "2022-09".into(),
            }],
            address: "12 Example Street".into(),
            email: "jane@example.com".into(),
            phone: "+1 555 0100".into(),
            summary: "Systems engineer.".into(),
            twitter: "@janedoe".into(),
        };

        let json = serde_json::to_string(&resume).expect("serialize");
        let back: Resume = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, resume);
    }
}
