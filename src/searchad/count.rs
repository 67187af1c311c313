use serde_json::Value;

/// 远端对小数值做掩码时返回的字面量
pub const MASKED_COUNT: &str = "< 10";
/// 掩码数值按中点 5 计
pub const MASKED_COUNT_VALUE: u64 = 5;

/// 将远端返回的数字或字符串计数统一转换为非负整数
///
/// - 缺失或 null → 0
/// - 整数 → 原值（负数按 0 处理）
/// - `"< 10"` → 5
/// - 其他字符串去掉逗号后按有符号整数解析，失败为 0
/// - 其他类型 → 0
pub fn parse_count(value: Option<&Value>) -> u64 {
    match value {
        None | Some(Value::Null) => 0,
        // 负数与浮点数都取不到 u64
        Some(Value::Number(n)) => n.as_u64().unwrap_or(0),
        Some(Value::String(s)) => {
            if s.trim() == MASKED_COUNT {
                return MASKED_COUNT_VALUE;
            }
            let digits: String = s.trim().chars().filter(|c| *c != ',').collect();
            digits.parse::<i64>().map(|v| v.max(0) as u64).unwrap_or(0)
        }
        Some(_) => 0,
    }
}

/// 千分位格式化，如 1234567 → "1,234,567"
pub fn format_display(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
