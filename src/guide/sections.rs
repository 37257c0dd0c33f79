use super::record::is_blank;
use super::PropertyGuideRecord;
use crate::labels::Labels;

/// The labelled blocks of a guest guide, in the order they are printed
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum SectionKind {
    CheckInOut,
    Wifi,
    Contacts,
    Amenities,
    Rules,
}

impl SectionKind {
    /// Amenities and rules are printed as bullet lists
    pub fn is_bulleted(&self) -> bool {
        matches!(self, SectionKind::Amenities | SectionKind::Rules)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub kind: SectionKind,
    pub heading: &'static str,
    pub lines: Vec<String>,
}

/// Collects the sections that have something to show. Sections without data
/// are left out entirely, so nothing of them is printed, heading included.
pub fn guide_sections(record: &PropertyGuideRecord, labels: &Labels) -> Vec<Section> {
    let mut sections = Vec::new();
    let mut push = |kind, heading, lines: Vec<String>| {
        if !lines.is_empty() {
            sections.push(Section {
                kind,
                heading,
                lines,
            });
        }
    };

    let times = [
        (labels.check_in, record.checkin()),
        (labels.check_out, record.checkout()),
    ];
    push(
        SectionKind::CheckInOut,
        labels.check_in_out,
        times
            .iter()
            .filter_map(|(label, value)| value.map(|v| labels.labelled(label, v)))
            .collect(),
    );

    push(
        SectionKind::Wifi,
        labels.wifi,
        record
            .wifi
            .iter()
            .flat_map(|wifi| {
                [
                    labels.labelled(labels.wifi_network, &wifi.ssid),
                    labels.labelled(labels.wifi_password, &wifi.password),
                ]
            })
            .collect(),
    );

    push(
        SectionKind::Contacts,
        labels.contacts,
        record
            .contacts()
            .map(|c| match (is_blank(&c.name), is_blank(&c.phone)) {
                (false, false) => labels.labelled(&c.name, &c.phone),
                (true, _) => c.phone.trim().to_string(),
                (false, true) => c.name.trim().to_string(),
            })
            .collect(),
    );

    push(
        SectionKind::Amenities,
        labels.amenities,
        record.amenities().map(str::to_string).collect(),
    );
    push(
        SectionKind::Rules,
        labels.rules,
        record.rules().map(str::to_string).collect(),
    );

    sections
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::guide::{Contact, Wifi};
    use crate::labels::ENGLISH;

    #[test]
    fn only_sections_with_data_are_kept() {
        let record = PropertyGuideRecord {
            checkout: Some("10:00".into()),
            contacts: vec![Contact {
                name: "Host".into(),
                phone: "+49 30 1234".into(),
            }],
            rules: vec!["No parties".into()],
            ..PropertyGuideRecord::named("Loft")
        };
        let sections = guide_sections(&record, &ENGLISH);
        let kinds: Vec<_> = sections.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![SectionKind::CheckInOut, SectionKind::Contacts, SectionKind::Rules]
        );
        assert_eq!(sections[0].lines, vec!["Check-out: 10:00".to_string()]);
        assert_eq!(sections[1].lines, vec!["Host: +49 30 1234".to_string()]);
    }

    #[test]
    fn lists_of_blank_entries_are_left_out() {
        let record = PropertyGuideRecord {
            contacts: vec![
                Contact::default(),
                Contact {
                    name: "Emergency".into(),
                    phone: " ".into(),
                },
            ],
            amenities: vec![" ".repeat(400)],
            rules: vec!["".into(), "   ".into()],
            ..PropertyGuideRecord::named("Loft")
        };
        let sections = guide_sections(&record, &ENGLISH);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].kind, SectionKind::Contacts);
        assert_eq!(sections[0].lines, vec!["Emergency".to_string()]);
    }

    #[test]
    fn wifi_prints_network_and_password() {
        let record = PropertyGuideRecord {
            wifi: Some(Wifi {
                ssid: "Seeblick".into(),
                password: "sunset".into(),
            }),
            ..PropertyGuideRecord::named("Loft")
        };
        let sections = guide_sections(&record, &ENGLISH);
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0].heading, "WiFi");
        assert_eq!(
            sections[0].lines,
            vec!["Network: Seeblick".to_string(), "Password: sunset".to_string()]
        );
    }
}
