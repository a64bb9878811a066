//! 输入掩码与校验
//!
//! 纯函数，无状态：
//! - CPF 分组显示 (`###.###.###-##`) 与位数校验
//! - 金额掩码（按键视为向“分”缓冲区追加数字）及其反解
//! - 年龄归一化（最多 3 位，限制在 [0, 120]）
//! - 掩码输入框的按键过滤

use crate::{CPF_DIGITS, MAX_AGE};

/// 掩码输入框中始终放行的编辑/导航键
const EDITING_KEYS: [&str; 7] = [
    "Backspace",
    "Delete",
    "ArrowLeft",
    "ArrowRight",
    "Tab",
    "Home",
    "End",
];

/// 不产生字符、掩码输入框也放行的命名键
const NAMED_KEYS: [&str; 4] = ["Enter", "Escape", "ArrowUp", "ArrowDown"];

/// 金额缓冲区最多保留的有效数字（分），保证 f64 精确表示
const CURRENCY_MAX_DIGITS: usize = 15;

/// 年龄输入最多保留的字符数
const AGE_MAX_LEN: usize = 3;

/// 去掉所有非数字字符
pub fn only_digits(input: &str) -> String {
    input.chars().filter(char::is_ascii_digit).collect()
}

// =========================================================
// CPF
// =========================================================

/// 将输入格式化为 `###.###.###-##`，不完整的输入得到不完整的输出
pub fn format_cpf(input: &str) -> String {
    let mut out = String::with_capacity(CPF_DIGITS + 3);
    for (i, ch) in only_digits(input).chars().take(CPF_DIGITS).enumerate() {
        match i {
            3 | 6 => out.push('.'),
            9 => out.push('-'),
            _ => {}
        }
        out.push(ch);
    }
    out
}

/// 去掉标点后恰好 11 位数字
pub fn is_valid_cpf(input: &str) -> bool {
    only_digits(input).len() == CPF_DIGITS
}

// =========================================================
// 金额
// =========================================================

/// 整数部分每 3 位插入一个 `.`
fn group_thousands(int_part: &str) -> String {
    let len = int_part.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push('.');
        }
        out.push(ch);
    }
    out
}

/// 金额掩码：`"1290"` → `"12,90"`，`"123456"` → `"1.234,56"`
///
/// 输入中的数字整体视为“分”。去掉前导零后左侧补零到至少 3 位，
/// 末两位为分，其余为整数部分。空输入得到 `"0,00"`。
/// 有效数字超过 15 位时丢弃多出的按键。
pub fn format_currency(input: &str) -> String {
    let digits = only_digits(input);
    let significant = digits.trim_start_matches('0');
    let significant = &significant[..significant.len().min(CURRENCY_MAX_DIGITS)];
    let base = format!("{:0>3}", if significant.is_empty() { "0" } else { significant });
    let (int_part, cents) = base.split_at(base.len() - 2);
    format!("{},{}", group_thousands(int_part), cents)
}

/// 反解金额掩码为“分”，超出范围时饱和
pub fn unmask_currency_cents(mask: &str) -> u64 {
    mask.bytes()
        .filter(u8::is_ascii_digit)
        .fold(0u64, |acc, b| {
            acc.saturating_mul(10).saturating_add(u64::from(b - b'0'))
        })
}

/// 反解金额掩码：`"12,90"` → `12.9`，空输入 → `0.0`
pub fn unmask_currency(mask: &str) -> f64 {
    unmask_currency_cents(mask) as f64 / 100.0
}

/// 将金额数值转成掩码文本，用于进入编辑状态时回填
pub fn format_currency_value(value: f64) -> String {
    let max_cents = 10u64.pow(CURRENCY_MAX_DIGITS as u32) - 1;
    let cents = if value.is_finite() && value > 0.0 {
        ((value * 100.0).round() as u64).min(max_cents)
    } else {
        0
    };
    format_currency(&cents.to_string())
}

/// 列表展示用的货币格式：`R$ 1.234,56`
pub fn format_brl(value: f64) -> String {
    if value < 0.0 {
        format!("-R$ {}", format_currency_value(-value))
    } else {
        format!("R$ {}", format_currency_value(value))
    }
}

// =========================================================
// 年龄
// =========================================================

/// 年龄归一化：只保留数字，最多 3 位，限制在 [0, 120]；空输入得到空串
pub fn normalize_age(input: &str) -> String {
    let digits: String = only_digits(input).chars().take(AGE_MAX_LEN).collect();
    if digits.is_empty() {
        return String::new();
    }
    match digits.parse::<u16>() {
        Ok(n) => n.min(u16::from(MAX_AGE)).to_string(),
        Err(_) => String::new(),
    }
}

// =========================================================
// 按键过滤
// =========================================================

/// 掩码输入框的按键过滤
///
/// 放行编辑/导航键、带 Ctrl/Meta 的组合键（复制粘贴）、数字键、
/// Enter/Escape/上下方向键与 F1-F12。
/// 其余按键一律拦截，包括 `Dead`、`Process` 这类输入法组合键。
pub fn is_allowed_masked_key(key: &str, ctrl: bool, meta: bool) -> bool {
    if ctrl || meta || EDITING_KEYS.contains(&key) || NAMED_KEYS.contains(&key) {
        return true;
    }
    if is_function_key(key) {
        return true;
    }
    let mut chars = key.chars();
    matches!((chars.next(), chars.next()), (Some(ch), None) if ch.is_ascii_digit())
}

fn is_function_key(key: &str) -> bool {
    key.strip_prefix('F')
        .and_then(|n| n.parse::<u8>().ok())
        .is_some_and(|n| (1..=12).contains(&n))
}
