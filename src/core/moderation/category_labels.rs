// Display labels for word categories.
//
// Kept apart from the category enums so the rule engine never depends on
// presentation text.

use super::moderation_models::{
    BannedCategory, CategoryCatalog, CategoryOption, SuspiciousCategory,
};

pub fn banned_label(category: BannedCategory) -> &'static str {
    match category {
        BannedCategory::Illegal => "불법 물품",
        BannedCategory::Adult => "성인",
        BannedCategory::Weapon => "무기류",
        BannedCategory::PersonalInfo => "개인정보",
        BannedCategory::IllegalService => "불법 서비스",
        BannedCategory::Medicine => "의약품",
    }
}

pub fn suspicious_label(category: SuspiciousCategory) -> &'static str {
    match category {
        SuspiciousCategory::UrgentSale => "급매 유도",
        SuspiciousCategory::Payment => "결제 유도",
        SuspiciousCategory::Contact => "외부 연락",
        SuspiciousCategory::Claim => "상품 상태 주장",
    }
}

/// Both enumerations paired with their labels, in declaration order.
pub fn category_catalog() -> CategoryCatalog {
    CategoryCatalog {
        banned: BannedCategory::all()
            .into_iter()
            .map(|c| CategoryOption {
                key: c.as_str(),
                label: banned_label(c),
            })
            .collect(),
        suspicious: SuspiciousCategory::all()
            .into_iter()
            .map(|c| CategoryOption {
                key: c.as_str(),
                label: suspicious_label(c),
            })
            .collect(),
    }
}
