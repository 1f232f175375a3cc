/// Preset sample images offered next to each upload slot

/// A remote sample picture
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleImage {
    pub url: &'static str,
    pub alt: &'static str,
}

pub const SAMPLE_MODELS: [SampleImage; 4] = [
    SampleImage {
        url: "https://images.pexels.com/photos/91227/pexels-photo-91227.jpeg?auto=compress&cs=tinysrgb&w=600",
        alt: "Man in grey sweater",
    },
    SampleImage {
        url: "https://images.pexels.com/photos/774909/pexels-photo-774909.jpeg?auto=compress&cs=tinysrgb&w=600",
        alt: "Woman with curly hair",
    },
    SampleImage {
        url: "https://images.pexels.com/photos/1043474/pexels-photo-1043474.jpeg?auto=compress&cs=tinysrgb&w=600",
        alt: "Man in a suit",
    },
    SampleImage {
        url: "https://images.pexels.com/photos/1181690/pexels-photo-1181690.jpeg?auto=compress&cs=tinysrgb&w=600",
        alt: "Woman in a white top",
    },
];

pub const SAMPLE_ITEMS: [SampleImage; 4] = [
    SampleImage {
        url: "https://images.pexels.com/photos/4210866/pexels-photo-4210866.jpeg?auto=compress&cs=tinysrgb&w=600",
        alt: "Denim jacket",
    },
    SampleImage {
        url: "https://images.pexels.com/photos/1025732/pexels-photo-1025732.jpeg?auto=compress&cs=tinysrgb&w=600",
        alt: "Red sunglasses",
    },
    SampleImage {
        url: "https://images.pexels.com/photos/2043590/pexels-photo-2043590.jpeg?auto=compress&cs=tinysrgb&w=600",
        alt: "Black leather jacket",
    },
    SampleImage {
        url: "https://images.pexels.com/photos/1154861/pexels-photo-1154861.jpeg?auto=compress&cs=tinysrgb&w=600",
        alt: "Blue knitted hat",
    },
];
