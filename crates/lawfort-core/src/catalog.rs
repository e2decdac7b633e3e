//! Built-in catalog of Indian cyber laws and the library filter.

use serde::Serialize;

/// One statute, section, or policy in the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LawRecord {
    pub id: u32,
    pub title: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    /// Plain-language summary.
    pub simplified: &'static str,
    pub year: u16,
    pub sections: &'static [&'static str],
    pub tags: &'static [&'static str],
}

impl LawRecord {
    /// Case-insensitive match of an already lower-cased term against the
    /// title, description, summary, and tags.
    fn mentions(&self, needle: &str) -> bool {
        [self.title, self.description, self.simplified]
            .into_iter()
            .chain(self.tags.iter().copied())
            .any(|field| field.to_lowercase().contains(needle))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Category {
    pub id: u32,
    pub title: &'static str,
}

static LAWS: [LawRecord; 9] = [
    LawRecord {
        id: 1,
        title: "Information Technology Act, 2000",
        category: "Cyber Crimes",
        description: "The primary law in India dealing with cybercrime and electronic commerce.",
        simplified: "Think of it as the main rulebook for the internet in India. It covers everything from digital signatures to hacking penalties.",
        year: 2000,
        sections: &["Section 43", "Section 66", "Section 67"],
        tags: &["IT Act", "Cyber Crime", "Electronic Evidence"],
    },
    LawRecord {
        id: 2,
        title: "Digital Personal Data Protection Act, 2023",
        category: "Data Protection & Privacy",
        description: "An Act to provide for the processing of digital personal data in a manner that recognizes both the right of individuals to protect their personal data and the need to process such personal data for lawful purposes.",
        simplified: "This law is all about your privacy. It forces companies to ask for your permission before using your data and punishes them if they misuse it.",
        year: 2023,
        sections: &["Section 3", "Section 8"],
        tags: &["Privacy", "DPDP", "Data Rights"],
    },
    LawRecord {
        id: 3,
        title: "Section 66F - Cyber Terrorism",
        category: "Cyber Terrorism",
        description: "Punishment for cyber terrorism.",
        simplified: "This section deals with acts that threaten the unity, integrity, security or sovereignty of India or strike terror in the people using digital means.",
        year: 2008,
        sections: &["Section 66F"],
        tags: &["Terrorism", "National Security"],
    },
    LawRecord {
        id: 4,
        title: "Section 66C - Identity Theft",
        category: "Identity Theft",
        description: "Punishment for identity theft.",
        simplified: "If someone uses your password or digital signature without your permission, they can be punished under this law.",
        year: 2008,
        sections: &["Section 66C"],
        tags: &["Identity Theft", "Fraud"],
    },
    LawRecord {
        id: 5,
        title: "Section 66D - Cheating by Personation",
        category: "Online Fraud & Financial Crimes",
        description: "Punishment for cheating by personation by using computer resource.",
        simplified: "This covers scenarios where someone pretends to be someone else online to cheat people.",
        year: 2008,
        sections: &["Section 66D"],
        tags: &["Cheating", "Impersonation"],
    },
    LawRecord {
        id: 6,
        title: "National Cyber Security Policy, 2013",
        category: "Compliance & Standards",
        description: "A policy framework to protect information and information infrastructure in cyberspace.",
        simplified: "A government plan to make the internet safer for everyone in the country.",
        year: 2013,
        sections: &[],
        tags: &["Policy", "Security Infrastructure"],
    },
    LawRecord {
        id: 7,
        title: "POCSO Act (Digital Safety)",
        category: "Child Safety Online",
        description: "Protection of Children from Sexual Offences Act, specifically addressing digital exploitation.",
        simplified: "Strict laws to protect children from online abuse and exploitation.",
        year: 2012,
        sections: &["Section 13", "Section 14"],
        tags: &["Child Safety", "POCSO"],
    },
    LawRecord {
        id: 8,
        title: "Copyright Act (Digital Amendments)",
        category: "Intellectual Property Rights",
        description: "Provisions related to digital copyright infringement.",
        simplified: "Rules that stop people from stealing digital creations like music, movies, and software.",
        year: 2012,
        sections: &["Section 65A"],
        tags: &["Copyright", "Piracy"],
    },
    LawRecord {
        id: 9,
        title: "Credit Card Fraud Regulations",
        category: "Online Fraud & Financial Crimes",
        description: "RBI guidelines and legal provisions against credit card fraud.",
        simplified: "Rules protecting you if your credit card is used without your permission.",
        year: 2020,
        sections: &[],
        tags: &["Banking", "Fraud", "Financial"],
    },
];

static CATEGORY_TITLES: [&str; 26] = [
    "Cyber Crimes",
    "Data Protection & Privacy",
    "Hacking & Unauthorized Access",
    "Online Fraud & Financial Crimes",
    "Digital Evidence & Forensics",
    "Cyber Terrorism",
    "Social Media Misuse",
    "Identity Theft",
    "Malware & Viruses",
    "E-Commerce Frauds",
    "Intellectual Property Rights",
    "Child Safety Online",
    "Cyber Stalking & Bullying",
    "Phishing & Social Engineering",
    "Cryptocurrency & Blockchain",
    "Cloud Computing Issues",
    "IoT Security",
    "AI Regulations",
    "Dark Web Activities",
    "Network Security",
    "Mobile Device Security",
    "Telecommunications",
    "Jurisdiction Issues",
    "International Cooperation",
    "Compliance & Standards",
    "Emerging Threats",
];

/// Every law in the library, in display order.
pub fn laws() -> &'static [LawRecord] {
    &LAWS
}

/// Browsable categories, numbered from 1.
pub fn categories() -> impl Iterator<Item = Category> {
    CATEGORY_TITLES
        .iter()
        .copied()
        .zip(1u32..)
        .map(|(title, id)| Category { id, title })
}

pub fn law_by_id(id: u32) -> Option<&'static LawRecord> {
    LAWS.iter().find(|law| law.id == id)
}

/// Look up a category by exact title or, failing that, case-insensitively.
pub fn category_by_title(title: &str) -> Option<Category> {
    let title = title.trim();
    categories()
        .find(|category| category.title == title)
        .or_else(|| categories().find(|category| category.title.eq_ignore_ascii_case(title)))
}

/// Laws matching both the optional category and the search term.
///
/// The category must match exactly. The term is trimmed and matched
/// case-insensitively as a substring of any text field or tag; a blank term
/// matches everything. Source order is kept.
pub fn filter<'a>(
    laws: &'a [LawRecord],
    search_term: &str,
    category: Option<&str>,
) -> Vec<&'a LawRecord> {
    let needle = search_term.trim().to_lowercase();
    laws.iter()
        .filter(|law| category.is_none_or(|category| law.category == category))
        .filter(|law| needle.is_empty() || law.mentions(&needle))
        .collect()
}

/// What the library screen shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrowseMode {
    /// No filter applied; show the category grid.
    Categories,
    /// A search or category is active; show matching laws.
    Results,
}

/// Search box and category selection of the library screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogView {
    search: String,
    category: Option<String>,
}

impl CatalogView {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(&self) -> &str {
        &self.search
    }

    pub fn category(&self) -> Option<&str> {
        self.category.as_deref()
    }

    pub fn set_search(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn select_category(&mut self, category: Option<String>) {
        self.category = category;
    }

    /// Drop both the search term and the category.
    pub fn clear(&mut self) {
        self.search.clear();
        self.category = None;
    }

    pub fn mode(&self) -> BrowseMode {
        if self.search.trim().is_empty() && self.category.is_none() {
            BrowseMode::Categories
        } else {
            BrowseMode::Results
        }
    }

    pub fn results(&self) -> Vec<&'static LawRecord> {
        filter(laws(), &self.search, self.category.as_deref())
    }
}
