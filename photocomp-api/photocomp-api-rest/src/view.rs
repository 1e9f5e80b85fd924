use chrono::{DateTime, Utc};
use photocomp_common::image_entry::{ImageEntry, ImageEntryStatus, ImageEntryWithScore};
use serde::Serialize;
use uuid::Uuid;

/// Settings that shape how entries are rendered for one request.
#[derive(Clone, Copy, Debug)]
pub struct ViewContext<'a> {
    pub include_restricted_data: bool,
    pub image_base_url: Option<&'a str>,
    pub image_width: u64,
}

impl ViewContext<'_> {
    /// `{base}img_{id}-{width}-95.{ext}`, or the bare id without a base url.
    pub fn image_url(&self, entry: &ImageEntry) -> String {
        match self.image_base_url {
            Some(base) => format!(
                "{base}img_{}-{}-95.{}",
                entry.image_id,
                self.image_width,
                entry.image_extension.as_deref().unwrap_or("jpg")
            ),
            None => entry.image_id.to_string(),
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntryView {
    pub image_id: Uuid,
    pub competition_id: i32,
    pub description: String,
    pub date_submitted: DateTime<Utc>,
    #[serde(rename = "imageURL")]
    pub image_url: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ImageEntryStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub third_party_opt_in: Option<bool>,
}

impl ImageEntryView {
    pub fn new(entry: ImageEntry, ctx: &ViewContext<'_>) -> Self {
        let image_url = ctx.image_url(&entry);
        let restricted = |v| ctx.include_restricted_data.then_some(v);

        Self {
            image_id: entry.image_id,
            competition_id: entry.competition_id,
            date_submitted: entry.date_submitted,
            image_url,
            first_name: restricted(entry.first_name),
            last_name: restricted(entry.last_name),
            email: restricted(entry.email),
            ip_address: restricted(entry.ip_address),
            status: ctx.include_restricted_data.then_some(entry.status),
            third_party_opt_in: ctx
                .include_restricted_data
                .then_some(entry.third_party_opt_in),
            description: entry.description,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageEntryWithScoreView {
    #[serde(flatten)]
    pub image_entry: ImageEntryView,
    pub score: u64,
}

impl ImageEntryWithScoreView {
    pub fn new(row: ImageEntryWithScore, ctx: &ViewContext<'_>) -> Self {
        Self {
            score: row.score,
            image_entry: ImageEntryView::new(row.image_entry, ctx),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn entry() -> ImageEntry {
        ImageEntry {
            image_id: Uuid::nil(),
            competition_id: 4,
            first_name: "Ada".into(),
            last_name: "Byron".into(),
            email: "ada@example.com".into(),
            description: "Harbour at dawn".into(),
            status: ImageEntryStatus::Verified,
            date_submitted: Utc.with_ymd_and_hms(2024, 5, 1, 8, 0, 0).unwrap(),
            ip_address: "10.0.0.1".into(),
            image_extension: Some("png".into()),
            third_party_opt_in: true,
        }
    }

    fn ctx(include_restricted_data: bool, image_base_url: Option<&str>) -> ViewContext<'_> {
        ViewContext {
            include_restricted_data,
            image_base_url,
            image_width: 700,
        }
    }

    #[test]
    fn test_public_view_hides_personal_data() {
        let json = serde_json::to_value(ImageEntryView::new(entry(), &ctx(false, None))).unwrap();
        let keys: Vec<_> = json.as_object().unwrap().keys().cloned().collect();

        for hidden in [
            "firstName",
            "lastName",
            "email",
            "status",
            "ipAddress",
            "thirdPartyOptIn",
        ] {
            assert!(!keys.iter().any(|k| k == hidden), "{hidden}");
        }
        assert_eq!(json["imageURL"], Uuid::nil().to_string());
        assert_eq!(json["competitionId"], 4);
    }

    #[test]
    fn test_restricted_view_and_url() {
        let row = ImageEntryWithScore {
            score: 3,
            image_entry: entry(),
        };
        let view = ImageEntryWithScoreView::new(row, &ctx(true, Some("https://cdn.example/")));
        let json = serde_json::to_value(view).unwrap();

        assert_eq!(json["score"], 3);
        assert_eq!(json["firstName"], "Ada");
        assert_eq!(json["status"], "STATUS_VERIFIED");
        assert_eq!(json["thirdPartyOptIn"], true);
        assert_eq!(
            json["imageURL"],
            format!("https://cdn.example/img_{}-700-95.png", Uuid::nil())
        );
    }
}
