/// JSON wire contract of `POST /api/generate`

use serde::{Deserialize, Serialize};

use crate::source::ImagePayload;

/// Weight given to the single instruction prompt
const PROMPT_WEIGHT: u32 = 1;

/// One weighted text prompt
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct TextPrompt<'a> {
    pub text: &'a str,
    pub weight: u32,
}

/// Request body: the instruction plus both input images
#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct GenerateRequest<'a> {
    pub text_prompts: Vec<TextPrompt<'a>>,
    #[serde(rename = "modelImg")]
    pub model_img: &'a str,
    #[serde(rename = "itemImg")]
    pub item_img: &'a str,
}

impl<'a> GenerateRequest<'a> {
    pub fn new(instruction: &'a str, model_image: &'a ImagePayload, item_image: &'a ImagePayload) -> Self {
        Self {
            text_prompts: vec![TextPrompt {
                text: instruction,
                weight: PROMPT_WEIGHT,
            }],
            model_img: model_image.as_str(),
            item_img: item_image.as_str(),
        }
    }
}

/// Response body; both fields are optional on the wire
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct GenerateResponse {
    #[serde(rename = "imageData", default)]
    pub image_data: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_matches_wire_shape() {
        let model = ImagePayload::from_data_uri("data:image/png;base64,MODEL");
        let item = ImagePayload::from_data_uri("data:image/png;base64,ITEM");
        let request = GenerateRequest::new("wear it", &model, &item);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(
            value,
            json!({
                "text_prompts": [{ "text": "wear it", "weight": 1 }],
                "modelImg": "data:image/png;base64,MODEL",
                "itemImg": "data:image/png;base64,ITEM",
            })
        );
    }

    #[test]
    fn test_response_tolerates_missing_fields() {
        let response: GenerateResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response, GenerateResponse::default());

        let response: GenerateResponse =
            serde_json::from_str(r#"{"imageData":"data:image/png;base64,AAA","extra":true}"#).unwrap();
        assert_eq!(response.image_data.as_deref(), Some("data:image/png;base64,AAA"));
    }
}
