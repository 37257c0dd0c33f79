use serde::{Deserialize, Serialize};

/// Languages the printed artefacts can be produced in
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
}

impl Language {
    pub fn labels(&self) -> &'static Labels {
        match self {
            Language::En => &ENGLISH,
            Language::De => &GERMAN,
        }
    }
}

/// Every piece of fixed text printed on a guest guide or QR poster
#[derive(Debug, PartialEq, Eq)]
pub struct Labels {
    pub welcome: &'static str,
    pub check_in_out: &'static str,
    pub check_in: &'static str,
    pub check_out: &'static str,
    pub wifi: &'static str,
    pub wifi_network: &'static str,
    pub wifi_password: &'static str,
    pub contacts: &'static str,
    pub amenities: &'static str,
    pub rules: &'static str,
    pub generated_by: &'static str,
    pub page: &'static str,
    pub of: &'static str,
    pub footer_separator: &'static str,
    pub guide_suffix: &'static str,
    pub qr_heading: &'static str,
    pub qr_hint: &'static str,
}

pub static ENGLISH: Labels = Labels {
    welcome: "Welcome to",
    check_in_out: "Check-in & Check-out",
    check_in: "Check-in",
    check_out: "Check-out",
    wifi: "WiFi",
    wifi_network: "Network",
    wifi_password: "Password",
    contacts: "Contacts",
    amenities: "Amenities",
    rules: "House Rules",
    generated_by: "Generated by",
    page: "page",
    of: "of",
    footer_separator: "–",
    guide_suffix: "_GuestGuide.pdf",
    qr_heading: "QR code for",
    qr_hint: "Guests can scan this QR code to open the digital guest folder directly.",
};

pub static GERMAN: Labels = Labels {
    welcome: "Willkommen bei",
    check_in_out: "Check-in & Check-out",
    check_in: "Check-in",
    check_out: "Check-out",
    wifi: "WiFi",
    wifi_network: "Netzwerk",
    wifi_password: "Passwort",
    contacts: "Kontakte",
    amenities: "Ausstattung",
    rules: "Hausregeln",
    generated_by: "Erstellt mit",
    page: "Seite",
    of: "von",
    footer_separator: "-",
    guide_suffix: "_Gästemappe.pdf",
    qr_heading: "QR-Code für",
    qr_hint: "Gäste können diesen QR-Code scannen, um direkt zur digitalen Gästemappe zu gelangen.",
};

impl Labels {
    pub fn title(&self, property_name: &str) -> String {
        format!("{} {}", self.welcome, property_name)
    }

    /// `label: value`, as used for check-in times and WiFi credentials
    pub fn labelled(&self, label: &str, value: &str) -> String {
        format!("{label}: {value}")
    }

    pub fn footer(&self, product: &str, page: usize, page_count: usize) -> String {
        format!(
            "{} {} {} {} {page} {} {page_count}",
            self.generated_by, product, self.footer_separator, self.page, self.of
        )
    }

    pub fn qr_title(&self, property_name: &str) -> String {
        format!("{} {}", self.qr_heading, property_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_footer() {
        assert_eq!(
            ENGLISH.footer("Welcome Link", 2, 3),
            "Generated by Welcome Link – page 2 of 3"
        );
    }

    #[test]
    fn german_wording() {
        let labels = Language::De.labels();
        assert_eq!(labels.title("Haus am See"), "Willkommen bei Haus am See");
        assert_eq!(
            labels.footer("Welcome Link", 1, 1),
            "Erstellt mit Welcome Link - Seite 1 von 1"
        );
        assert_eq!(labels.labelled(labels.wifi_password, "geheim"), "Passwort: geheim");
    }
}
