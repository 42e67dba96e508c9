//! Fixed prompts and the response schema sent with every analysis request.

use serde_json::{Value, json};

/// Consulting-partner persona and report structure. The model answers in Simplified Chinese.
pub const SYSTEM_INSTRUCTION: &str = r#"你是一位来自麦肯锡（McKinsey）或波士顿咨询（BCG）的资深合伙人，专注于大中华区消费品与数字化战略。
你正在为一家世界500强企业的CEO准备一份高度机密的竞品对标分析报告。

你的分析必须遵循以下专业标准：
1. 结构化思维：采用MECE原则，逻辑严密。
2. 数据驱动：利用搜索增强获取最新的市场声量、用户反馈及社交媒体（微博、小红书、抖音、知乎、微信、B站）数据。
3. 深度洞察：不仅描述事实，更要揭示背后的商业逻辑和战略动机。
4. 语言风格：极致专业的简体中文，术语准确（如：GMV、渗透率、用户全生命周期价值、DTC战略等）。

报告结构要求：
- 执行摘要：顶层结论。
- 行业图景：宏观趋势。
- 竞品画像：每个品牌的定位、优势与劣势。
- 战略对标：在多个维度（知名度、忠诚度、产品力、营销效率）的评分对比。
- 行动计划：分阶段的战略执行建议。"#;

/// Separator used when naming several brands in the user prompt.
const BRAND_SEPARATOR: &str = "、";

/// Build the user prompt naming the brands.
pub fn user_prompt(brands: &[String]) -> String {
    format!(
        "请对以下品牌进行深度的对标竞争分析：{}。\n\
         重点关注：\n\
         1. 它们在中国社交媒体（小红书、抖音、微博等）的实时表现。\n\
         2. 它们的产品差异化亮点与用户痛点。\n\
         3. 它们的营销策略与渠道布局。\n\
         请根据最新的互联网数据（含搜索增强）严格按照JSON格式生成报告。",
        brands.join(BRAND_SEPARATOR)
    )
}

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn number() -> Value {
    json!({ "type": "NUMBER" })
}

fn array_of(items: Value) -> Value {
    json!({ "type": "ARRAY", "items": items })
}

/// OpenAPI-style schema for `generationConfig.responseSchema`.
///
/// Mirrors `AnalysisReport` minus `sources`, which come from grounding metadata.
pub fn response_schema() -> Value {
    let metric = json!({
        "type": "OBJECT",
        "properties": {
            "platform": string(),
            "mentionCount": number(),
            "sentimentScore": number(),
            "hotTopic": string()
        }
    });

    let competitor = json!({
        "type": "OBJECT",
        "properties": {
            "name": string(),
            "positioning": string(),
            "targetAudience": string(),
            "metrics": array_of(metric),
            "strengths": array_of(string()),
            "weaknesses": array_of(string())
        },
        "required": ["name", "positioning", "metrics", "strengths", "weaknesses"]
    });

    let comparison = json!({
        "type": "OBJECT",
        "properties": {
            "dimension": string(),
            "values": array_of(json!({
                "type": "OBJECT",
                "properties": { "brand": string(), "score": number() }
            }))
        },
        "required": ["dimension", "values"]
    });

    let phase = json!({
        "type": "OBJECT",
        "properties": {
            "phase": string(),
            "steps": array_of(string())
        }
    });

    json!({
        "type": "OBJECT",
        "properties": {
            "executiveSummary": string(),
            "marketLandscape": {
                "type": "OBJECT",
                "properties": {
                    "marketSize": string(),
                    "trends": array_of(string()),
                    "competitiveLandscape": string()
                },
                "required": ["marketSize", "trends", "competitiveLandscape"]
            },
            "competitors": array_of(competitor),
            "strategicComparison": array_of(comparison),
            "marketingInsights": string(),
            "actionPlan": array_of(phase)
        },
        "required": [
            "executiveSummary",
            "marketLandscape",
            "competitors",
            "strategicComparison",
            "marketingInsights",
            "actionPlan"
        ]
    })
}
