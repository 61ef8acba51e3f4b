/// Fixed prompt sent with every photo. The model is instructed to reply in
/// exactly six labeled lines; `parser` consumes this shape on the way back.
pub const ANALYSIS_PROMPT: &str = "You are an expert reseller who identifies items from photos \
and estimates their resale value. Analyze the item in this image and respond in EXACTLY this format, \
with one field per line and nothing else:\n\
ITEM: [specific item name, including brand and model if visible]\n\
CATEGORY: [one of: Electronics, Clothing, Shoes, Accessories, Home, Toys, Sports, Books, Collectibles, Other]\n\
CONDITION: [one of: New, Like New, Good, Fair, Poor]\n\
DESCRIPTION: [one or two sentences a seller could paste into a listing]\n\
VALUE: [estimated resale price range in USD, e.g. $15 - $25]\n\
ATTRIBUTES: [a single-line JSON object of extra string details, e.g. {\"color\": \"red\", \"size\": \"M\"}, or {} if none]";

pub fn image_data_url(base64_image: &str) -> String {
    format!("data:image/jpeg;base64,{}", base64_image)
}
