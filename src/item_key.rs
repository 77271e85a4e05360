//! 品项识别模块 - 把自由文本的商品名映射到标准品项 key
//!
//! 规则表有序，第一个命中的规则生效。更具体的规则要排在宽泛的规则前面，
//! 比如 `Soy_milk` 在 `Milk` 之前、各种水果在 `Fruit` 之前。

use regex::{Regex, RegexBuilder};
use std::sync::LazyLock;

/// 匹配方式（均不区分大小写）
#[derive(Debug, Clone)]
pub enum ItemPattern {
    /// 正则，在字符串任意位置命中即可
    Regex(Regex),
    /// 子串包含
    Contains(String),
    /// 整串相等（忽略首尾空白）
    Exact(String),
}

impl ItemPattern {
    pub fn regex(pattern: &str) -> Result<Self, regex::Error> {
        RegexBuilder::new(pattern)
            .case_insensitive(true)
            .build()
            .map(ItemPattern::Regex)
    }

    pub fn contains(needle: impl AsRef<str>) -> Self {
        ItemPattern::Contains(needle.as_ref().to_lowercase())
    }

    pub fn exact(text: impl AsRef<str>) -> Self {
        ItemPattern::Exact(text.as_ref().trim().to_lowercase())
    }

    pub fn is_match(&self, name: &str) -> bool {
        match self {
            ItemPattern::Regex(re) => re.is_match(name),
            ItemPattern::Contains(needle) => name.to_lowercase().contains(needle.as_str()),
            ItemPattern::Exact(text) => name.trim().to_lowercase() == *text,
        }
    }
}

/// 一条规则：匹配方式 + 品项 key
#[derive(Debug, Clone)]
pub struct ItemKeyRule {
    pub pattern: ItemPattern,
    pub item_key: String,
}

impl ItemKeyRule {
    pub fn new(pattern: ItemPattern, item_key: impl Into<String>) -> Self {
        Self {
            pattern,
            item_key: item_key.into(),
        }
    }
}

/// 默认规则表（pattern, item key）
///
/// 下游代码直接以 item key 字符串为键，拼写不能改。只能往后追加。
const DEFAULT_RULES: &[(&str, &str)] = &[
    // 乳制品
    (r"豆漿|豆奶|soy\s*milk", "Soy_milk"),
    (r"優格|優酪乳|酸奶|yogh?urt", "Yogurt"),
    (r"鮮奶|牛奶|牛乳|奶粉|milk", "Milk"),
    (r"起司|乳酪|芝士|cheese", "Cheese"),
    (r"奶油|黃油|butter", "Butter"),
    // 蛋
    (r"雞蛋|鴨蛋|蛋|\beggs?\b", "Egg"),
    // 肉类
    (r"雞肉|雞胸|雞腿|雞翅|chicken", "Chicken_meat"),
    (r"豬肉|豬排|五花|培根|火腿|pork|bacon|ham\b", "Pork_meat"),
    (r"牛肉|牛排|牛腱|beef|steak", "Beef_meat"),
    // 海鲜
    (r"蝦|shrimp|prawn", "Shrimp"),
    (r"鮭魚|鮪魚|鯖魚|魚|salmon|tuna|fish", "Fish"),
    // 豆制品
    (r"豆腐|tofu", "Tofu"),
    // 水果：具体品种在前，Fruit 兜底
    (r"果汁|juice", "Juice"),
    (r"柳橙|柳丁|橘子|橙|orange|mandarin|tangerine", "Citrus_orange"),
    (r"檸檬|lemon", "Citrus_lemon"),
    (r"香蕉|banana", "Banana"),
    (r"蘋果|apple", "Apple"),
    (r"草莓|strawberr", "Strawberry"),
    (r"葡萄|\bgrapes?\b", "Grape"),
    (r"水果|fruit", "Fruit"),
    // 蔬菜：具体品种在前，Vegetable 兜底
    (r"大蒜|蒜頭|蒜|garlic", "Garlic_bulb"),
    (r"青蔥|蔥花|scallion|green\s+onion|spring\s+onion", "Scallion"),
    (r"洋蔥|onion", "Onion"),
    (r"番茄|蕃茄|tomato", "Tomato"),
    (r"地瓜|番薯|sweet\s*potato", "Sweet_potato"),
    (r"馬鈴薯|土豆|potato", "Potato"),
    (r"紅蘿蔔|胡蘿蔔|carrot", "Carrot"),
    (r"高麗菜|包心菜|cabbage", "Cabbage"),
    (r"花椰菜|青花菜|broccoli", "Broccoli"),
    (r"菠菜|spinach", "Spinach"),
    (r"生菜|萵苣|lettuce", "Lettuce"),
    (r"香菇|菇|mushroom", "Mushroom"),
    (r"蔬菜|青菜|vegetable|veggie", "Vegetable"),
    // 主食
    (r"吐司|麵包|bread|toast", "Bread"),
    (r"麵條|拉麵|義大利麵|noodle|pasta|spaghetti", "Noodles"),
    (r"白米|米飯|糙米|\brice\b", "Rice"),
];

static DEFAULT_RESOLVER: LazyLock<ItemKeyResolver> = LazyLock::new(ItemKeyResolver::new);

/// 品项识别器
#[derive(Debug, Clone)]
pub struct ItemKeyResolver {
    rules: Vec<ItemKeyRule>,
}

impl ItemKeyResolver {
    /// 使用默认规则表
    pub fn new() -> Self {
        let rules = DEFAULT_RULES
            .iter()
            .map(|(pattern, key)| {
                ItemKeyRule::new(
                    ItemPattern::regex(pattern).expect("Invalid item key regex"),
                    *key,
                )
            })
            .collect();
        Self { rules }
    }

    /// 使用自定义规则表
    pub fn with_rules(rules: Vec<ItemKeyRule>) -> Self {
        Self { rules }
    }

    /// 在表尾追加规则
    pub fn push_rule(&mut self, rule: ItemKeyRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[ItemKeyRule] {
        &self.rules
    }

    /// 表中出现的 item key（按首次出现顺序去重）
    pub fn item_keys(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = Vec::new();
        for rule in &self.rules {
            if !keys.contains(&rule.item_key.as_str()) {
                keys.push(&rule.item_key);
            }
        }
        keys
    }

    /// 返回第一个命中规则的 item key
    ///
    /// 名称为空或没有规则命中时返回 None。
    pub fn resolve(&self, name: Option<&str>) -> Option<&str> {
        let name = name.filter(|n| !n.is_empty())?;
        self.rules
            .iter()
            .find(|rule| rule.pattern.is_match(name))
            .map(|rule| rule.item_key.as_str())
    }
}

impl Default for ItemKeyResolver {
    fn default() -> Self {
        Self::new()
    }
}

/// 用默认规则表识别品项
pub fn resolve_item_key(name: Option<&str>) -> Option<&'static str> {
    DEFAULT_RESOLVER.resolve(name)
}
