//! CLI de avaliação e servidor Axum para o etiquetador POS

mod corpus_io;
mod evaluation;

use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use clap::{Parser, Subcommand, ValueEnum};
use pos_core::{corpus::demo_sentences, HmmConfig, PosTagger, TaggedSentence, ViterbiResult};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "pos-web", about = "Etiquetador POS com HMM e decodificação Viterbi")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Treina sobre um corpus e mede a acurácia sobre outro
    Evaluate {
        /// Corpus de treino (`palavra=TAG`, uma sentença por linha)
        #[arg(long)]
        train: PathBuf,

        /// Corpus de teste no mesmo formato
        #[arg(long)]
        test: PathBuf,

        #[arg(long, value_enum, default_value_t = Variant::Suffix)]
        variant: Variant,

        /// Configuração JSON; substitui `--variant`
        #[arg(long)]
        config: Option<PathBuf>,

        /// Decodifica as sentenças em paralelo
        #[arg(long)]
        parallel: bool,

        /// Quantidade de erros e acertos listados
        #[arg(long, default_value = "10")]
        top_k: usize,
    },
    /// Sobe o servidor HTTP
    Serve {
        /// Corpus de treino; sem ele usa o corpus de demonstração
        #[arg(long)]
        train: Option<PathBuf>,

        #[arg(long, default_value = "0.0.0.0:3000")]
        addr: String,

        #[arg(long, value_enum, default_value_t = Variant::Suffix)]
        variant: Variant,

        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Variant {
    /// Apenas o balde genérico de hapax
    Base,
    /// Baldes de sufixo/prefixo
    Suffix,
}

fn load_config(variant: Variant, path: Option<&PathBuf>) -> pos_core::Result<HmmConfig> {
    match path {
        Some(path) => HmmConfig::from_path(path),
        None => Ok(match variant {
            Variant::Base => HmmConfig::base(),
            Variant::Suffix => HmmConfig::suffix_aware(),
        }),
    }
}

/// Estado compartilhado da aplicação
struct AppState {
    tagger: PosTagger,
}

#[derive(Deserialize)]
struct TagRequest {
    sentences: Vec<Vec<String>>,
    #[serde(default)]
    trace: bool,
}

type TagOutput = (Vec<TaggedSentence>, Option<Vec<ViterbiResult>>);

#[derive(Serialize)]
struct TagResponse {
    tagged: Vec<TaggedSentence>,
    #[serde(skip_serializing_if = "Option::is_none")]
    traces: Option<Vec<ViterbiResult>>,
    processing_ms: u64,
    total_tokens: usize,
}

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let result = match cli.command {
        Command::Evaluate {
            train,
            test,
            variant,
            config,
            parallel,
            top_k,
        } => run_evaluate(train, test, variant, config, parallel, top_k),
        Command::Serve {
            train,
            addr,
            variant,
            config,
        } => run_serve(train, addr, variant, config),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}

fn run_evaluate(
    train: PathBuf,
    test: PathBuf,
    variant: Variant,
    config: Option<PathBuf>,
    parallel: bool,
    top_k: usize,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(variant, config.as_ref())?;
    let train = corpus_io::load_corpus(&train)?;
    let gold = corpus_io::load_corpus(&test)?;
    let words = corpus_io::strip_tags(&gold);

    let start = Instant::now();
    let tagger = PosTagger::train(&train, config)?;
    info!(ms = start.elapsed().as_millis() as u64, "modelo treinado");

    let start = Instant::now();
    let predicted = if parallel {
        tagger.tag_parallel(&words)?
    } else {
        tagger.tag(&words)?
    };
    info!(
        ms = start.elapsed().as_millis() as u64,
        sentences = words.len(),
        parallel,
        "decodificação concluída"
    );

    let summary = tagger.summary();
    println!(
        "Tags: {}  Vocabulário: {}  Hapax: {}",
        summary.tags.len(),
        summary.vocabulary,
        summary.hapax_words
    );
    for (name, count) in &summary.buckets {
        println!("  balde {name:<8} {count}");
    }
    println!();
    print!("{}", evaluation::evaluate(&train, &gold, &predicted, top_k));
    Ok(())
}

fn run_serve(
    train: Option<PathBuf>,
    addr: String,
    variant: Variant,
    config: Option<PathBuf>,
) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(variant, config.as_ref())?;
    let tagger = match train {
        Some(path) => PosTagger::train(&corpus_io::load_corpus(&path)?, config)?,
        None => PosTagger::demo(config)?,
    };
    let summary = tagger.summary();
    info!(
        tags = summary.tags.len(),
        vocabulary = summary.vocabulary,
        "modelo pronto"
    );

    let state = Arc::new(AppState { tagger });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/tag", post(tag_handler))
        .route("/model", get(model_handler))
        .route("/demo-sentences", get(demo_sentences_handler))
        .layer(cors)
        .with_state(state);

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async move {
        let listener = tokio::net::TcpListener::bind(&addr).await?;
        info!("🚀 Servidor POS iniciado em http://{addr}");
        axum::serve(listener, app).await?;
        Ok::<(), Box<dyn std::error::Error>>(())
    })
}

fn error_response(status: StatusCode, message: String) -> Response {
    (status, Json(serde_json::json!({ "error": message }))).into_response()
}

/// Etiqueta sentenças já tokenizadas
async fn tag_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<TagRequest>,
) -> Response {
    if req.sentences.is_empty() {
        return error_response(StatusCode::BAD_REQUEST, "Nenhuma sentença".to_string());
    }

    let total_tokens: usize = req.sentences.iter().map(Vec::len).sum();
    let started = Instant::now();

    // O Viterbi é síncrono e limitado por CPU: roda fora do runtime async
    let handle = tokio::task::spawn_blocking(move || -> pos_core::Result<TagOutput> {
        let tagger = &state.tagger;
        if req.trace {
            let traces = req
                .sentences
                .iter()
                .map(|s| tagger.trace_sentence(s))
                .collect::<pos_core::Result<Vec<_>>>()?;
            let tagged = traces.iter().map(|t| t.tagged.clone()).collect();
            Ok((tagged, Some(traces)))
        } else {
            tagger.tag_parallel(&req.sentences).map(|tagged| (tagged, None))
        }
    });

    match handle.await {
        Ok(Ok((tagged, traces))) => Json(TagResponse {
            tagged,
            traces,
            processing_ms: started.elapsed().as_millis() as u64,
            total_tokens,
        })
        .into_response(),
        Ok(Err(e)) => {
            error!("falha ao etiquetar: {e}");
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
        Err(e) => {
            error!("tarefa de decodificação abortada: {e}");
            error_response(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
    }
}

/// Estatísticas do modelo carregado
async fn model_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(state.tagger.summary())
}

/// Retorna sentenças de demonstração
async fn demo_sentences_handler() -> impl IntoResponse {
    Json(demo_sentences())
}
