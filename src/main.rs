mod assistant;
mod certificate;
mod config;
mod error;
mod gemini;
mod i18n;
mod keyboards;
mod pages;
mod quiz;
mod session;
mod studio;
mod summary;
mod ticker;
mod upload;

use std::sync::Arc;

use assistant::StudyHelper;
use certificate::Certificate;
use config::Config;
use dotenv::dotenv;
use error::StudyError;
use gemini::GeminiClient;
use i18n::{Language, Translations};
use quiz::progress::{QuizView, Selection, Step};
use quiz::view::{option_from_letter, render_question};
use session::{Screen, Session, Study, Tab, Tone};
use studio::{ContentType, StudioDraft};
use teloxide::{
    dispatching::dialogue::{ErasedStorage, InMemStorage, Storage},
    net::Download,
    prelude::*,
    types::{ChatAction, Document, InputFile, KeyboardMarkup, KeyboardRemove, ParseMode},
    utils::html,
};
use ticker::ProgressTicker;
use upload::UploadedFile;

type StudyDialogue = Dialogue<State, ErasedStorage<State>>;
type HandlerResult<T = ()> = Result<T, Box<dyn std::error::Error + Send + Sync>>;
type SessionStorage = Arc<ErasedStorage<State>>;

#[derive(Clone, Default, serde::Serialize, serde::Deserialize)]
pub enum State {
    #[default]
    Start,
    LanguageSelect(Session),
    Upload(Session),
    Processing(Session),
    Dashboard(Session),
    NameInput(Session),
    Studio(Session),
}

impl From<Session> for State {
    fn from(session: Session) -> Self {
        if session.studio.is_some() {
            return State::Studio(session);
        }
        match session.screen {
            Screen::LanguageSelect => State::LanguageSelect(session),
            Screen::Upload => State::Upload(session),
            Screen::Processing => State::Processing(session),
            Screen::Dashboard => {
                let naming = session
                    .study
                    .as_ref()
                    .is_some_and(|s| s.progress.view == QuizView::NameInput);
                if naming {
                    State::NameInput(session)
                } else {
                    State::Dashboard(session)
                }
            }
        }
    }
}

#[tokio::main]
async fn main() {
    let dotenv_result = dotenv();
    pretty_env_logger::init();
    if let Err(e) = dotenv_result {
        log::debug!("No .env file loaded: {}", e);
    }
    log::info!("Starting study bot...");

    let config = match Config::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            log::error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };

    let helper = match GeminiClient::new(&config) {
        Ok(gemini) => Arc::new(StudyHelper::new(gemini)),
        Err(e) => {
            log::error!("Unable to build the Gemini client: {}", e);
            std::process::exit(1);
        }
    };

    let bot = Bot::from_env();

    // Uploaded documents stay in memory only
    let storage: SessionStorage = InMemStorage::<State>::new().erase();

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .enter_dialogue::<Message, ErasedStorage<State>, State>()
            .branch(
                dptree::filter(|msg: Message| msg.text().map(str::trim) == Some("/start"))
                    .endpoint(start),
            )
            .branch(dptree::case![State::Start].endpoint(start))
            .branch(dptree::case![State::LanguageSelect(session)].endpoint(receive_language))
            .branch(dptree::case![State::Upload(session)].endpoint(upload_screen))
            .branch(dptree::case![State::Processing(session)].endpoint(processing))
            .branch(dptree::case![State::Dashboard(session)].endpoint(dashboard))
            .branch(dptree::case![State::NameInput(session)].endpoint(receive_name))
            .branch(dptree::case![State::Studio(session)].endpoint(studio_screen)),
    )
    .dependencies(dptree::deps![storage, helper, config])
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;
}

async fn start(bot: Bot, dialogue: StudyDialogue, msg: Message) -> HandlerResult {
    let greeting = format!(
        "{} {}\n{} {}\n\n{} / {}",
        i18n::EN.welcome,
        i18n::EN.brand_name,
        i18n::AR.welcome,
        i18n::AR.brand_name,
        i18n::EN.choose_lang,
        i18n::AR.choose_lang,
    );
    bot.send_message(msg.chat.id, greeting)
        .reply_markup(keyboards::languages())
        .await?;

    dialogue.update(State::LanguageSelect(Session::new())).await?;
    Ok(())
}

async fn receive_language(
    bot: Bot,
    dialogue: StudyDialogue,
    mut session: Session,
    msg: Message,
) -> HandlerResult {
    match msg.text().and_then(Language::from_native_name) {
        Some(language) => {
            session.select_language(language);
            log::info!("Chat {} chose {}", msg.chat.id, language.name());
            send_upload_prompt(&bot, msg.chat.id, &session).await?;
            dialogue.update(session).await?;
        }
        None => {
            bot.send_message(
                msg.chat.id,
                format!("{} / {}", i18n::EN.choose_lang, i18n::AR.choose_lang),
            )
            .reply_markup(keyboards::languages())
            .await?;
        }
    }
    Ok(())
}

async fn upload_screen(
    bot: Bot,
    dialogue: StudyDialogue,
    helper: Arc<StudyHelper>,
    config: Arc<Config>,
    mut session: Session,
    msg: Message,
) -> HandlerResult {
    let t = session.ui_language.t();

    if let Some(document) = msg.document() {
        return process_document(bot, dialogue, helper, config, session, msg.chat.id, document)
            .await;
    }

    let Some(text) = msg.text() else {
        // photos, voice notes and the like
        bot.send_message(msg.chat.id, t.file_error).await?;
        return Ok(());
    };

    if let Some(language) = Language::from_native_name(text) {
        session.set_content_language(language);
    } else if text == t.formal {
        session.set_tone(Tone::Formal);
    } else if text == t.friendly {
        session.set_tone(Tone::Friendly);
    } else if text == t.generator {
        session.open_studio();
        send_studio_prompt(&bot, msg.chat.id, &session).await?;
        dialogue.update(session).await?;
        return Ok(());
    } else {
        send_upload_prompt(&bot, msg.chat.id, &session).await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, t.settings_saved).await?;
    send_upload_prompt(&bot, msg.chat.id, &session).await?;
    dialogue.update(session).await?;
    Ok(())
}

async fn process_document(
    bot: Bot,
    dialogue: StudyDialogue,
    helper: Arc<StudyHelper>,
    config: Arc<Config>,
    mut session: Session,
    chat_id: ChatId,
    document: &Document,
) -> HandlerResult {
    let t = session.ui_language.t();
    let name = document
        .file_name
        .clone()
        .unwrap_or_else(|| "document".to_string());
    let mime = document.mime_type.as_ref().map(|m| m.essence_str().to_string());
    log::info!("Chat {} uploaded {:?} ({:?})", chat_id, name, mime);

    let checked = upload::resolve_mime_type(&name, mime.as_deref()).and_then(|_| {
        upload::check_size(&name, u64::from(document.file.size), config.max_upload_bytes)
    });
    if let Err(e) = checked {
        log::info!("Rejected upload: {}", e);
        bot.send_message(chat_id, e.user_message(t)).await?;
        return Ok(());
    }

    let status = bot
        .send_message(chat_id, ticker::render(t.analyzing, 0.0))
        .reply_markup(KeyboardRemove::new())
        .await?;

    let bytes = match download(&bot, &document.file.id).await {
        Ok(bytes) => bytes,
        Err(e) => {
            log::error!("Downloading {:?} failed: {}", name, e);
            bot.send_message(chat_id, t.error)
                .reply_markup(keyboards::upload(t))
                .await?;
            return Ok(());
        }
    };
    let file = match UploadedFile::new(&name, mime.as_deref(), &bytes) {
        Ok(file) => file,
        Err(e) => {
            log::error!("Reading {:?} failed: {}", name, e);
            bot.send_message(chat_id, e.user_message(t))
                .reply_markup(keyboards::upload(t))
                .await?;
            return Ok(());
        }
    };

    session.begin_processing(file.clone())?;
    dialogue.update(session.clone()).await?;

    let ticker = ProgressTicker::start(bot.clone(), chat_id, status.id, t.analyzing);
    let generated = generate_study(&helper, &config, &session, &file, &ticker).await;
    ticker.finish();

    let outcome = settle_processing(&mut session, generated);
    if let Err(e) = &outcome {
        log::error!("Processing {:?} failed: {}", name, e);
    }
    // saved before replying so a failed send can't leave the chat in Processing
    dialogue.update(session.clone()).await?;

    match outcome {
        Ok(()) => {
            // best effort, the summary below is what matters
            let _ = bot
                .edit_message_text(chat_id, status.id, ticker::render(t.analyzing, 100.0))
                .await;
            if let Some(study) = &session.study {
                send_summary(&bot, chat_id, study, t).await?;
            }
        }
        Err(e) => {
            bot.send_message(chat_id, e.user_message(t))
                .reply_markup(keyboards::upload(t))
                .await?;
        }
    }
    Ok(())
}

/// Leaves the session on the dashboard or back on upload, never in processing.
fn settle_processing(
    session: &mut Session,
    generated: Result<(summary::SummaryData, quiz::Quiz), StudyError>,
) -> Result<(), StudyError> {
    let outcome = generated.and_then(|(summary, quiz)| session.finish_processing(summary, quiz));
    if outcome.is_err() {
        session.fail_processing();
    }
    outcome
}

async fn download(bot: &Bot, file_id: &str) -> HandlerResult<Vec<u8>> {
    let file = bot.get_file(file_id).await?;
    let mut bytes = Vec::new();
    bot.download_file(&file.path, &mut bytes).await?;
    Ok(bytes)
}

async fn generate_study(
    helper: &StudyHelper,
    config: &Config,
    session: &Session,
    file: &UploadedFile,
    ticker: &ProgressTicker,
) -> Result<(summary::SummaryData, quiz::Quiz), StudyError> {
    let t = session.ui_language.t();

    ticker.set_label(t.generating_summary);
    let summary = helper
        .summarize(file, session.content_language, session.tone)
        .await?;

    ticker.set_label(t.crafting_quiz);
    let quiz = helper
        .generate_quiz(file, session.content_language, config.initial_quiz_size, &[])
        .await?;

    Ok((summary, quiz))
}

async fn processing(bot: Bot, session: Session, msg: Message) -> HandlerResult {
    bot.send_message(msg.chat.id, session.ui_language.t().still_working)
        .await?;
    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
enum DashboardAction {
    ShowSummary,
    ShowQuiz,
    Answer(usize),
    Next,
    Previous,
    LoadMore,
    UploadNew,
    OpenStudio,
    Unknown,
}

fn dashboard_action(text: &str, t: &Translations) -> DashboardAction {
    let text = text.trim();
    if text == t.summary {
        DashboardAction::ShowSummary
    } else if text == t.quiz || text.strip_prefix(t.quiz).is_some_and(|rest| rest.starts_with(" (")) {
        DashboardAction::ShowQuiz
    } else if let Some(option) = option_from_letter(text) {
        DashboardAction::Answer(option)
    } else if text == t.next || text == t.finish_quiz {
        DashboardAction::Next
    } else if text == t.previous {
        DashboardAction::Previous
    } else if text == t.generate_more {
        DashboardAction::LoadMore
    } else if text == t.upload_new {
        DashboardAction::UploadNew
    } else if text == t.generator {
        DashboardAction::OpenStudio
    } else {
        DashboardAction::Unknown
    }
}

async fn dashboard(
    bot: Bot,
    dialogue: StudyDialogue,
    helper: Arc<StudyHelper>,
    config: Arc<Config>,
    mut session: Session,
    msg: Message,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let t = session.ui_language.t();

    if session.study.is_none() {
        log::warn!("Chat {} reached the dashboard without material", chat_id);
        session.upload_new();
        send_upload_prompt(&bot, chat_id, &session).await?;
        dialogue.update(session).await?;
        return Ok(());
    }

    let action = msg
        .text()
        .map(|text| dashboard_action(text, t))
        .unwrap_or(DashboardAction::Unknown);

    match action {
        DashboardAction::ShowSummary => {
            let study = session.study.as_mut().ok_or(StudyError::NoStudyLoaded)?;
            study.tab = Tab::Summary;
            send_summary(&bot, chat_id, study, t).await?;
        }
        DashboardAction::ShowQuiz => {
            let study = session.study.as_mut().ok_or(StudyError::NoStudyLoaded)?;
            study.tab = Tab::Quiz;
            send_quiz(&bot, chat_id, study, t).await?;
        }
        DashboardAction::Answer(option) => {
            let study = session.study.as_mut().ok_or(StudyError::NoStudyLoaded)?;
            if study.tab != Tab::Quiz || study.progress.view != QuizView::Questions {
                study.tab = Tab::Quiz;
                send_quiz(&bot, chat_id, study, t).await?;
            } else {
                match study.progress.select(&study.quiz, option) {
                    Selection::Revealed { correct } => {
                        log::debug!("Chat {} answered {} (correct: {})", chat_id, option, correct);
                        send_quiz(&bot, chat_id, study, t).await?;
                    }
                    Selection::AlreadyAnswered => {
                        bot.send_message(chat_id, t.already_answered).await?;
                    }
                    Selection::InvalidOption => {
                        bot.send_message(chat_id, t.choose_option).await?;
                    }
                }
            }
        }
        DashboardAction::Next => {
            let study = session.study.as_mut().ok_or(StudyError::NoStudyLoaded)?;
            study.tab = Tab::Quiz;
            match study.progress.next(&study.quiz) {
                Step::Moved(_) => send_quiz(&bot, chat_id, study, t).await?,
                Step::NotAnswered => {
                    bot.send_message(chat_id, t.answer_first).await?;
                }
                Step::Closed => send_quiz(&bot, chat_id, study, t).await?,
                Step::Finished => {
                    let score = study.progress.score_percent(&study.quiz);
                    log::info!("Chat {} finished the quiz with {}%", chat_id, score);
                    bot.send_message(
                        chat_id,
                        format!(
                            "{}\n{}: {}%\n\n{}",
                            html::bold(t.quiz_completed),
                            t.final_score,
                            score,
                            t.enter_name_prompt
                        ),
                    )
                    .parse_mode(ParseMode::Html)
                    .reply_markup(KeyboardRemove::new())
                    .await?;
                }
            }
        }
        DashboardAction::Previous => {
            let study = session.study.as_mut().ok_or(StudyError::NoStudyLoaded)?;
            study.tab = Tab::Quiz;
            study.progress.previous();
            send_quiz(&bot, chat_id, study, t).await?;
        }
        DashboardAction::LoadMore => {
            let answering = session
                .study
                .as_ref()
                .is_some_and(|study| study.progress.is_answering());
            if answering {
                load_more_questions(&bot, chat_id, &helper, &config, &mut session).await?;
            } else {
                let study = session.study.as_mut().ok_or(StudyError::NoStudyLoaded)?;
                study.tab = Tab::Quiz;
                send_quiz(&bot, chat_id, study, t).await?;
            }
        }
        DashboardAction::UploadNew => {
            session.upload_new();
            send_upload_prompt(&bot, chat_id, &session).await?;
        }
        DashboardAction::OpenStudio => {
            session.open_studio();
            send_studio_prompt(&bot, chat_id, &session).await?;
        }
        DashboardAction::Unknown => {
            let study = session.study.as_ref().ok_or(StudyError::NoStudyLoaded)?;
            bot.send_message(chat_id, t.choose_option)
                .reply_markup(keyboards::dashboard(t, study))
                .await?;
        }
    }

    dialogue.update(session).await?;
    Ok(())
}

async fn load_more_questions(
    bot: &Bot,
    chat_id: ChatId,
    helper: &StudyHelper,
    config: &Config,
    session: &mut Session,
) -> HandlerResult {
    let t = session.ui_language.t();
    let (file, exclude) = {
        let study = session.study.as_mut().ok_or(StudyError::NoStudyLoaded)?;
        study.tab = Tab::Quiz;
        (study.file.clone(), study.quiz.question_texts())
    };

    bot.send_message(chat_id, t.generating_more).await?;
    let _ = bot.send_chat_action(chat_id, ChatAction::Typing).await;

    let appended = match helper
        .generate_quiz(&file, session.content_language, config.batch_size, &exclude)
        .await
    {
        Ok(batch) => session.append_questions(batch),
        Err(e) => Err(e),
    };

    let study = session.study.as_ref().ok_or(StudyError::NoStudyLoaded)?;
    match appended {
        Ok(added) => {
            log::info!("Chat {} now has {} questions", chat_id, study.quiz.len());
            bot.send_message(chat_id, format!("{} {}", t.questions_added, added))
                .reply_markup(keyboards::dashboard(t, study))
                .await?;
        }
        Err(e) => {
            log::warn!("Loading more questions failed: {}", e);
            bot.send_message(chat_id, t.load_more_failed)
                .reply_markup(keyboards::dashboard(t, study))
                .await?;
        }
    }
    Ok(())
}

async fn receive_name(
    bot: Bot,
    dialogue: StudyDialogue,
    mut session: Session,
    msg: Message,
) -> HandlerResult {
    let language = session.ui_language;
    let t = language.t();
    let study = session.study.as_mut().ok_or(StudyError::NoStudyLoaded)?;

    let submitted = msg
        .text()
        .is_some_and(|name| study.progress.submit_name(name));
    if !submitted {
        bot.send_message(msg.chat.id, t.enter_name_prompt).await?;
        return Ok(());
    }

    let name = study.progress.student_name.clone().unwrap_or_default();
    let certificate = Certificate::issue(&name, study.progress.score_percent(&study.quiz), language);
    log::info!("Issued certificate {} in chat {}", certificate.serial, msg.chat.id);

    bot.send_document(
        msg.chat.id,
        InputFile::memory(certificate.to_html_document().into_bytes())
            .file_name(certificate.file_name()),
    )
    .caption(certificate.caption_html())
    .parse_mode(ParseMode::Html)
    .reply_markup(keyboards::dashboard(t, study))
    .await?;

    dialogue.update(session).await?;
    Ok(())
}

async fn studio_screen(
    bot: Bot,
    dialogue: StudyDialogue,
    helper: Arc<StudyHelper>,
    mut session: Session,
    msg: Message,
) -> HandlerResult {
    let chat_id = msg.chat.id;
    let ui = session.ui_language;
    let t = ui.t();
    let mut draft = session
        .studio
        .clone()
        .unwrap_or_else(|| StudioDraft::new(ui));

    let Some(text) = msg.text() else {
        send_studio_prompt(&bot, chat_id, &session).await?;
        return Ok(());
    };

    if text == t.close {
        session.close_studio();
        match &session.study {
            Some(study) if session.screen == Screen::Dashboard => match study.tab {
                Tab::Summary => send_summary(&bot, chat_id, study, t).await?,
                Tab::Quiz => send_quiz(&bot, chat_id, study, t).await?,
            },
            _ => send_upload_prompt(&bot, chat_id, &session).await?,
        }
        dialogue.update(session).await?;
        return Ok(());
    }

    if let Some(kind) = ContentType::from_label(text, ui) {
        draft.content_type = kind;
        session.studio = Some(draft);
        send_studio_prompt(&bot, chat_id, &session).await?;
    } else if let Some(language) = Language::from_native_name(text) {
        draft.output_language = language;
        session.studio = Some(draft);
        send_studio_prompt(&bot, chat_id, &session).await?;
    } else {
        bot.send_message(chat_id, t.gen_generating).await?;
        let _ = bot.send_chat_action(chat_id, ChatAction::Typing).await;

        match helper
            .generate_content(text, draft.content_type, draft.output_language)
            .await
        {
            Ok(content) => {
                send_pages(&bot, chat_id, &content, false, keyboards::studio(ui)).await?;
                let file_name = studio::export_file_name(
                    draft.content_type,
                    chrono::Utc::now().timestamp_millis(),
                );
                bot.send_document(chat_id, InputFile::memory(content.into_bytes()).file_name(file_name))
                    .caption(t.gen_title)
                    .await?;
            }
            Err(e) => {
                log::error!("Content generation failed: {}", e);
                bot.send_message(chat_id, e.user_message(t))
                    .reply_markup(keyboards::studio(ui))
                    .await?;
            }
        }
        session.studio = Some(draft);
    }

    dialogue.update(session).await?;
    Ok(())
}

async fn send_upload_prompt(bot: &Bot, chat_id: ChatId, session: &Session) -> HandlerResult {
    let t = session.ui_language.t();
    let tone = match session.tone {
        Tone::Formal => t.formal,
        Tone::Friendly => t.friendly,
    };
    let text = format!(
        "{}\n{}\n{}\n\n{}: {}\n{}\n{}: {}",
        html::bold(t.upload_title),
        t.upload_subtitle,
        html::italic(t.file_type),
        t.choose_content_lang,
        html::bold(session.content_language.native_name()),
        html::italic(t.content_lang_desc),
        t.summary_style,
        html::bold(tone),
    );
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::upload(t))
        .await?;
    Ok(())
}

async fn send_studio_prompt(bot: &Bot, chat_id: ChatId, session: &Session) -> HandlerResult {
    let ui = session.ui_language;
    let t = ui.t();
    let draft = session.studio.clone().unwrap_or_else(|| StudioDraft::new(ui));
    let text = format!(
        "{}\n{}\n\n{}: {}\n{}: {}\n\n{}\n{}",
        html::bold(t.gen_title),
        html::italic(t.gen_subtitle),
        t.gen_type_label,
        html::bold(draft.content_type.label(ui)),
        t.choose_content_lang,
        html::bold(draft.output_language.native_name()),
        t.gen_topic_label,
        html::italic(t.gen_placeholder),
    );
    bot.send_message(chat_id, text)
        .parse_mode(ParseMode::Html)
        .reply_markup(keyboards::studio(ui))
        .await?;
    Ok(())
}

async fn send_summary(bot: &Bot, chat_id: ChatId, study: &Study, t: &Translations) -> HandlerResult {
    send_pages(
        bot,
        chat_id,
        &study.summary.render_html(t),
        true,
        keyboards::dashboard(t, study),
    )
    .await
}

async fn send_quiz(bot: &Bot, chat_id: ChatId, study: &Study, t: &Translations) -> HandlerResult {
    let keyboard = keyboards::dashboard(t, study);
    let text = match study.progress.view {
        QuizView::Questions => render_question(&study.quiz, &study.progress, t)
            .unwrap_or_else(|| t.choose_option.to_string()),
        QuizView::NameInput => t.enter_name_prompt.to_string(),
        QuizView::Certificate => format!(
            "{}\n{}: {}%",
            html::bold(t.quiz_completed),
            t.final_score,
            study.progress.score_percent(&study.quiz)
        ),
    };
    send_pages(bot, chat_id, &text, true, keyboard).await
}

async fn send_pages(
    bot: &Bot,
    chat_id: ChatId,
    text: &str,
    as_html: bool,
    keyboard: KeyboardMarkup,
) -> HandlerResult {
    let pages = pages::paginate(text, pages::MESSAGE_LIMIT);
    let last = pages.len().saturating_sub(1);
    for (i, page) in pages.into_iter().enumerate() {
        let mut request = bot.send_message(chat_id, page);
        if as_html {
            request = request.parse_mode(ParseMode::Html);
        }
        if i == last {
            request = request.reply_markup(keyboard.clone());
        }
        request.await?;
    }
    Ok(())
}
