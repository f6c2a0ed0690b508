mod analytics;
mod chat;
mod config;
mod quiz;

use std::sync::Arc;

use analytics::{Analytics, LogSink, WebhookSink, QUIZ_PAGE};
use chatgpt::{client::ChatGPT, config::ChatGPTEngine};
use config::Config;
use dotenv::dotenv;
use log::{debug, info, warn};
use quiz::{
    ai_helper::QuizHelper,
    results::{ResultsView, BOOKING_URL, BOOK_CALL_LABEL},
    QuizSession, Step,
};
use reqwest::Url;
use teloxide::{
    dispatching::dialogue::{serializer::Json, ErasedStorage, SqliteStorage, Storage},
    prelude::*,
    types::{ChatAction, InlineKeyboardButton, InlineKeyboardMarkup, KeyboardRemove, ParseMode},
    utils::command::BotCommands,
};

type QuizDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
type DialogueStorage = std::sync::Arc<ErasedStorage<State>>;
type Coach = Option<Arc<QuizHelper>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    Quiz {
        session: QuizSession,
    },
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "These commands are supported:")]
enum Command {
    #[command(description = "start the bottleneck quiz")]
    Start,
    #[command(description = "throw away your answers and start over")]
    Restart,
}

#[tokio::main]
async fn main() -> HandlerResult {
    // A missing .env is fine, the variables may come from the environment
    dotenv().ok();
    pretty_env_logger::init();
    info!("Starting bottleneck quiz bot...");

    let config = Config::from_env()?;
    let bot = Bot::from_env();
    bot.set_my_commands(Command::bot_commands()).await?;

    info!("Opening dialogue storage at {}", config.db_path);
    let storage: DialogueStorage = SqliteStorage::open(&config.db_path, Json).await?.erase();

    let mut analytics = Analytics::new().with_sink(LogSink);
    if let Some(url) = config.webhook_url.clone() {
        info!("Forwarding quiz events to {}", url);
        analytics = analytics.with_sink(WebhookSink::new(url));
    }
    let analytics = Arc::new(analytics);

    let coach: Coach = match &config.chatgpt_api_key {
        Some(key) => {
            let mut gpt = ChatGPT::new(key)?;
            gpt.config.engine = ChatGPTEngine::Gpt35Turbo;
            gpt.config.timeout = std::time::Duration::from_secs(15);
            Some(Arc::new(QuizHelper::new(gpt, config.personality)))
        }
        None => {
            info!("CHATGPT_API_KEY is not set, coach notes are disabled");
            None
        }
    };

    let handler = Update::filter_message()
        .enter_dialogue::<Message, ErasedStorage<State>, State>()
        .branch(dptree::entry().filter_command::<Command>().endpoint(start))
        .branch(dptree::case![State::Start].endpoint(start))
        .branch(dptree::case![State::Quiz { session }].endpoint(quiz_step));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![storage, analytics, coach])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

async fn start(
    bot: Bot,
    dialogue: QuizDialogue,
    msg: Message,
    analytics: Arc<Analytics>,
) -> HandlerResult {
    let session = QuizSession::new();
    send_step(&bot, msg.chat.id, &session).await?;
    analytics.track(QUIZ_PAGE, "page_view", None);

    dialogue.update(State::Quiz { session }).await?;
    Ok(())
}

async fn quiz_step(
    bot: Bot,
    dialogue: QuizDialogue,
    session: QuizSession,
    msg: Message,
    analytics: Arc<Analytics>,
    coach: Coach,
) -> HandlerResult {
    let Some(text) = msg.text() else {
        bot.send_message(msg.chat.id, "Please answer with text or use the buttons below.")
            .await?;
        return Ok(());
    };

    let next = session.apply_all(chat::parse_input(&session, text));
    if next == session {
        bot.send_message(msg.chat.id, chat::hint(&session, text))
            .await?;
        return Ok(());
    }

    if next.step != session.step {
        debug!(
            "Chat {} moved from step {} to step {}",
            msg.chat.id,
            session.step.index(),
            next.step.index()
        );
    }
    if session.step == Step::Intro {
        analytics.track(QUIZ_PAGE, "quiz_started", None);
    }

    if next.show_results {
        info!("Chat {} finished the quiz: {}", msg.chat.id, next.bottleneck());
        send_results(&bot, msg.chat.id, &next, coach).await?;
        analytics.track_completion(&next);
        dialogue.exit().await?;
        return Ok(());
    }

    send_step(&bot, msg.chat.id, &next).await?;
    dialogue.update(State::Quiz { session: next }).await?;
    Ok(())
}

async fn send_step(bot: &Bot, chat_id: ChatId, session: &QuizSession) -> HandlerResult {
    let request = bot
        .send_message(chat_id, chat::prompt(session))
        .parse_mode(ParseMode::Html);
    match chat::keyboard(session) {
        Some(keyboard) => request.reply_markup(keyboard).await?,
        None => request.reply_markup(KeyboardRemove::new()).await?,
    };
    Ok(())
}

async fn send_results(bot: &Bot, chat_id: ChatId, session: &QuizSession, coach: Coach) -> HandlerResult {
    let view = ResultsView::new(session);

    let booking = Url::parse(BOOKING_URL)?;
    let buttons = InlineKeyboardMarkup::new(vec![
        vec![InlineKeyboardButton::url(view.content.call_to_action, booking.clone())],
        vec![InlineKeyboardButton::url(BOOK_CALL_LABEL, booking)],
    ]);

    bot.send_message(chat_id, view.render_html())
        .parse_mode(ParseMode::Html)
        .reply_markup(buttons)
        .await?;

    if let Some(coach) = coach {
        // Only cosmetic, so a failure here is ignored
        let _ = bot.send_chat_action(chat_id, ChatAction::Typing).await;

        let note = coach
            .generate_coach_note(&view.first_name, view.bottleneck, &session.answers.magic_wand)
            .await
            .unwrap_or_else(|err| {
                warn!("Coach note failed, using the default copy: {}", err);
                view.content.solution.to_string()
            });
        bot.send_message(chat_id, note).await?;
    }

    bot.send_message(chat_id, "Send /start whenever you want to retake the quiz.")
        .await?;
    Ok(())
}
