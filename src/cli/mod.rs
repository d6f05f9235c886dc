//! CLI 모듈
//!
//! local-search-agent CLI 명령어 정의 및 구현

use std::io::Write;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tokio::io::{AsyncBufReadExt, BufReader};

use crate::agent::{QueryResult, SearchAgent, Whitelist};
use crate::config::{AgentConfig, DEFAULT_SITES};

// ============================================================================
// CLI Definition
// ============================================================================

#[derive(Parser)]
#[command(name = "local-search-agent")]
#[command(version, about = "화이트리스트 기반 웹 검색 에이전트", long_about = None)]
pub struct Cli {
    /// 사용할 모델 (기본: LOCAL_SEARCH_MODEL 또는 gemma3:12b)
    #[arg(long, global = true)]
    pub model: Option<String>,

    /// Ollama 서버 주소 (기본: OLLAMA_HOST 또는 http://localhost:11434)
    #[arg(long, global = true)]
    pub host: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 기본 사이트 목록
    Sites,

    /// 질문 하나에 답변
    Ask {
        /// 질문
        question: String,

        /// 사용할 사이트 번호 (예: 1,3,4) 또는 all
        #[arg(short, long, default_value = "all")]
        sites: String,

        /// 직접 지정할 URL (지정 시 --sites 무시)
        #[arg(short, long)]
        url: Vec<String>,

        /// JSON으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 대화형 세션 (exit 입력 시 종료)
    Chat {
        /// 사용할 사이트 번호 (예: 1,3,4) 또는 all
        #[arg(short, long, default_value = "all")]
        sites: String,

        /// 직접 지정할 URL (지정 시 --sites 무시)
        #[arg(short, long)]
        url: Vec<String>,
    },
}

// ============================================================================
// CLI Runner
// ============================================================================

/// CLI 명령어 실행
pub async fn run(cli: Cli) -> Result<()> {
    let config = AgentConfig::from_env().with_overrides(cli.model, cli.host);

    match cli.command {
        Commands::Sites => cmd_sites(),
        Commands::Ask {
            question,
            sites,
            url,
            json,
        } => cmd_ask(&config, &question, &sites, url, json).await,
        Commands::Chat { sites, url } => cmd_chat(&config, &sites, url).await,
    }
}

// ============================================================================
// Command Implementations
// ============================================================================

/// 사이트 목록 명령어 (sites)
fn cmd_sites() -> Result<()> {
    println!("[*] 기본 사이트 목록:\n");
    for (i, site) in DEFAULT_SITES.iter().enumerate() {
        println!("  [{}] {}", i + 1, site);
    }
    println!("  [all] 모든 사이트 사용");
    Ok(())
}

/// 단일 질문 명령어 (ask)
async fn cmd_ask(
    config: &AgentConfig,
    question: &str,
    sites: &str,
    urls: Vec<String>,
    json: bool,
) -> Result<()> {
    let whitelist = resolve_whitelist(sites, urls)?;
    let mut agent = SearchAgent::from_config(whitelist, config)?;

    if !json {
        println!("[*] 검색 중: \"{}\"", question);
    }

    let result = agent.query(question).await;

    if json {
        let output = serde_json::to_string_pretty(&result).context("JSON 직렬화 실패")?;
        println!("{}", output);
    } else {
        print_result(&result);
    }

    Ok(())
}

/// 대화형 명령어 (chat)
///
/// 하나의 에이전트를 유지하므로 "tell me more" 같은 후속 질문이 동작합니다.
async fn cmd_chat(config: &AgentConfig, sites: &str, urls: Vec<String>) -> Result<()> {
    let whitelist = resolve_whitelist(sites, urls)?;
    let mut agent = SearchAgent::from_config(whitelist, config)?;

    println!(
        "[OK] 에이전트 준비 완료 (모델: {}, 사이트 {} 개). 종료하려면 'exit'를 입력하세요.",
        agent.model(),
        agent.whitelist().len()
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        print!("\n질문> ");
        std::io::stdout().flush().context("stdout flush 실패")?;

        let Some(line) = lines.next_line().await.context("입력 읽기 실패")? else {
            break;
        };

        let question = line.trim();
        if question.eq_ignore_ascii_case("exit") {
            break;
        }
        if question.is_empty() {
            continue;
        }

        println!("[*] 생각 중...");
        let result = agent.query(question).await;
        print_result(&result);
    }

    Ok(())
}

// ============================================================================
// Helper Functions
// ============================================================================

/// --url 또는 --sites로 화이트리스트 구성
fn resolve_whitelist(sites: &str, urls: Vec<String>) -> Result<Whitelist> {
    let selected = if urls.is_empty() {
        parse_site_selection(sites, &DEFAULT_SITES)?
    } else {
        urls
    };

    Whitelist::new(selected).context("화이트리스트 구성 실패")
}

/// 사이트 선택 입력 파싱
///
/// `all`(대소문자 무시)이면 전체, 아니면 쉼표로 구분된 1부터 시작하는 번호
pub fn parse_site_selection(input: &str, all_sites: &[&str]) -> Result<Vec<String>> {
    let input = input.trim();

    if input.eq_ignore_ascii_case("all") {
        return Ok(all_sites.iter().map(|s| s.to_string()).collect());
    }

    let mut selected = Vec::new();
    for part in input.split(',') {
        let part = part.trim();
        let number: usize = part
            .parse()
            .with_context(|| format!("잘못된 입력: '{}' (번호를 쉼표로 구분하거나 'all')", part))?;

        match number.checked_sub(1).and_then(|i| all_sites.get(i)) {
            Some(site) => selected.push(site.to_string()),
            None => bail!(
                "범위를 벗어난 번호: {} (1-{} 사이여야 합니다)",
                number,
                all_sites.len()
            ),
        }
    }

    Ok(selected)
}

/// 결과 출력
fn print_result(result: &QueryResult) {
    println!();
    println!("=== 답변 ===");
    println!("{}", result.answer);
    println!();
    println!("출처: {}", result.source.as_deref().unwrap_or("-"));
}

// ============================================================================
// Tests
// ============================================================================
