use stockbot_models::{FetchError, FetchResult, LastPrice, PriceQuote, WatchCategory};

/// Renders one fetch outcome as a single user-facing line. Pure and
/// deterministic; the router and the scheduler both go through here so a
/// failed fetch reads the same everywhere.
pub fn format_quote_line(instrument_id: &str, result: &FetchResult<PriceQuote>) -> String {
    match result {
        Ok(quote) => {
            let name = quote.display_name.as_deref().unwrap_or(&quote.instrument_id);
            match &quote.last_price {
                LastPrice::Traded(price) => {
                    format!("{} ({}) 現價: {} 元", quote.instrument_id, name, price)
                }
                LastPrice::NoTrade => {
                    format!("{} ({}) 尚無成交價格", quote.instrument_id, name)
                }
            }
        }
        Err(FetchError::NotFound { .. }) => {
            format!("{instrument_id} 查詢失敗，請確認股票代號是否正確！")
        }
        Err(FetchError::Parse { .. }) => {
            format!("{instrument_id} 資料解析錯誤，請稍後再試！")
        }
        Err(FetchError::Transport { .. }) => {
            format!("{instrument_id} 無法取得股價，請稍後再試！")
        }
    }
}

/// Assembles the daily report: each category header followed by its quote
/// lines, categories in watchlist order.
pub fn format_report(sections: &[(WatchCategory, Vec<String>)]) -> String {
    let mut blocks = Vec::with_capacity(sections.len());
    for (category, lines) in sections {
        let mut block = format!("【{}】", category.label);
        for line in lines {
            block.push('\n');
            block.push_str(line);
        }
        blocks.push(block);
    }
    blocks.join("\n\n")
}
