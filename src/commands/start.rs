use crate::BotContext;

pub async fn execute(ctx: &BotContext, chat_id: i64) -> Result<(), String> {
    let asset = &ctx.config.asset;
    let fiat = &ctx.config.fiat;

    let message = format!(
        "Hello! I am your personal Binance assistant bot.\n\n\
         Here are the commands you can use:\n\
         /p2p - Get the top P2P rates for {asset} in {fiat}.\n\
         /p2p\\_amount <amount> <currency> - Get P2P rates for a specific amount. \
         Example: `/p2p_amount 5000 {fiat}` or `/p2p_amount 50 {asset}`.\n\
         /sell <amount> - Quote how much {fiat} you would receive selling {asset}, \
         skipping unreliable offers. Example: `/sell 120`.\n\
         /convert <amount> <from> <to> - Convert crypto. \
         Example: `/convert 1 BTC to ETH` or `/convert 100 USDT to TON`.\n\
         /coin <coin\\_symbol> - Get real-time info about a crypto coin. \
         Example: `/coin BTC` or `/coin SOL`.\n\
         /chart <coin\\_symbol> [days] - Price history chart. \
         Example: `/chart BTC 30`.\n\n\
         I also work inline: mention me with `<amount> <from> <to>` in any chat.",
        asset = asset,
        fiat = fiat
    );

    ctx.telegram
        .send_message(chat_id, &message, Some("Markdown"))
        .await
        .map_err(|e| e.to_string())?;

    Ok(())
}
