//! 象棋棋盘命令行工具
//!
//! 用于检查局面、列出合法着法和转换着法表示
//!
//! 支持两种模式：
//! 1. 单次命令模式：每次执行一个命令
//! 2. Server 模式：长驻进程，通过 stdin/stdout 以 JSON 行通信

use cchess_board::{
    fen_plus_turn, Board, BoardError, BoardResult, ChangeType, Color, GameStatus,
    SeatPair, FIRST_FEN,
};
use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};
use std::io::{self, BufRead, Write};

#[derive(Parser)]
#[command(name = "cchess")]
#[command(about = "Xiangqi board inspector", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 显示棋盘及每个棋子的合法目标位置
    Show {
        /// FEN 字符串
        #[arg(long, default_value = FIRST_FEN)]
        fen: String,
    },

    /// 获取合法着法
    Moves {
        /// FEN 字符串
        #[arg(long, default_value = FIRST_FEN)]
        fen: String,

        /// 走子方 (red, black)，缺省取 FEN plus 中的走子方
        #[arg(long)]
        color: Option<Color>,

        /// JSON 输出
        #[arg(long)]
        json: bool,
    },

    /// ICCS 着法转换为中文纵线着法
    Zh {
        /// FEN 字符串
        #[arg(long, default_value = FIRST_FEN)]
        fen: String,

        /// ICCS 着法，如 h2e2
        #[arg(long)]
        iccs: String,
    },

    /// 中文纵线着法转换为 ICCS 着法
    Iccs {
        /// FEN 字符串
        #[arg(long, default_value = FIRST_FEN)]
        fen: String,

        /// 中文着法，如 炮二平五
        #[arg(long)]
        zh: String,
    },

    /// 局面变换 (exchange, rotate, mirror)
    Change {
        /// FEN 字符串
        #[arg(long, default_value = FIRST_FEN)]
        fen: String,

        /// 变换方式
        #[arg(long)]
        kind: ChangeType,
    },

    /// 启动 server 模式（stdin/stdout 通信）
    Server,
}

#[derive(Serialize, Deserialize)]
struct MoveInfo {
    iccs: String,
    zh: String,
}

#[derive(Serialize, Deserialize)]
struct SideStatus {
    killed: bool,
    dead: bool,
    status: GameStatus,
}

// Server 模式的请求和响应结构
#[derive(Serialize, Deserialize)]
struct ServerRequest {
    cmd: String,
    #[serde(default)]
    fen: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    iccs: Option<String>,
    #[serde(default)]
    zh: Option<String>,
    #[serde(default)]
    kind: Option<String>,
}

#[derive(Serialize, Deserialize, Default)]
struct ServerResponse {
    ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    moves: Option<Vec<MoveInfo>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    zh: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    iccs: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    fen: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    red: Option<SideStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    black: Option<SideStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl ServerResponse {
    fn success_moves(moves: Vec<MoveInfo>) -> Self {
        Self {
            ok: true,
            moves: Some(moves),
            ..Default::default()
        }
    }

    fn success_zh(zh: String) -> Self {
        Self {
            ok: true,
            zh: Some(zh),
            ..Default::default()
        }
    }

    fn success_iccs(iccs: String) -> Self {
        Self {
            ok: true,
            iccs: Some(iccs),
            ..Default::default()
        }
    }

    fn success_fen(fen: String) -> Self {
        Self {
            ok: true,
            fen: Some(fen),
            ..Default::default()
        }
    }

    fn success_status(red: SideStatus, black: SideStatus) -> Self {
        Self {
            ok: true,
            red: Some(red),
            black: Some(black),
            ..Default::default()
        }
    }

    fn error(msg: &str) -> Self {
        Self {
            ok: false,
            error: Some(msg.to_string()),
            ..Default::default()
        }
    }
}

fn exit_on_error<T>(result: BoardResult<T>) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn main() {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Show { fen } => {
            let mut board = exit_on_error(Board::from_fen(&fen));
            print!("{}", board);
            println!("bottom: {}", board.bottom_color());
            for color in [Color::Red, Color::Black] {
                for seat in board.live_seats(color, None, None) {
                    let name = board.piece(seat).map(|p| p.to_string()).unwrap_or_default();
                    let seats = exit_on_error(board.legal_destinations(seat));
                    let text: Vec<String> = seats.iter().map(|s| s.to_string()).collect();
                    println!("{} {}: [{}]", name, seat, text.join(" "));
                }
            }
        }

        Commands::Moves { fen, color, json } => {
            let color = color.unwrap_or_else(|| exit_on_error(fen_plus_turn(&fen)));
            let moves = exit_on_error(move_infos(&fen, color));
            if json {
                println!("{}", to_json(&ServerResponse::success_moves(moves)));
            } else {
                println!("Legal moves ({}):", moves.len());
                for mv in &moves {
                    println!("  {} {}", mv.iccs, mv.zh);
                }
            }
        }

        Commands::Zh { fen, iccs } => println!("{}", exit_on_error(iccs_to_zh(&fen, &iccs))),

        Commands::Iccs { fen, zh } => println!("{}", exit_on_error(zh_to_iccs(&fen, &zh))),

        Commands::Change { fen, kind } => println!("{}", exit_on_error(change_fen(&fen, kind))),

        Commands::Server => run_server(),
    }
}

fn to_json(response: &ServerResponse) -> String {
    serde_json::to_string(response)
        .unwrap_or_else(|e| format!(r#"{{"ok":false,"error":"{}"}}"#, e))
}

fn move_infos(fen: &str, color: Color) -> BoardResult<Vec<MoveInfo>> {
    let mut board = Board::from_fen(fen)?;
    board
        .legal_moves(color)?
        .into_iter()
        .map(|pair| {
            Ok(MoveInfo {
                iccs: pair.iccs(),
                zh: board.zh_str(pair)?,
            })
        })
        .collect()
}

fn iccs_to_zh(fen: &str, iccs: &str) -> BoardResult<String> {
    let board = Board::from_fen(fen)?;
    let pair = SeatPair::from_iccs(iccs).ok_or_else(|| BoardError::InvalidIccs(iccs.to_string()))?;
    board.zh_str(pair)
}

fn zh_to_iccs(fen: &str, zh: &str) -> BoardResult<String> {
    let board = Board::from_fen(fen)?;
    Ok(board.seat_pair_from_zh(zh)?.iccs())
}

fn change_fen(fen: &str, kind: ChangeType) -> BoardResult<String> {
    let mut board = Board::from_fen(fen)?;
    board.change_side(kind)?;
    board.to_fen()
}

fn side_status(board: &mut Board, color: Color) -> BoardResult<SideStatus> {
    Ok(SideStatus {
        killed: board.is_killed(color)?,
        dead: board.is_dead(color)?,
        status: board.status(color)?,
    })
}

/// Server 模式主循环
fn run_server() {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(_) => break,
        };

        // 空行跳过
        if line.trim().is_empty() {
            continue;
        }

        // 解析请求
        let request: ServerRequest = match serde_json::from_str(&line) {
            Ok(r) => r,
            Err(e) => {
                let response = ServerResponse::error(&format!("Invalid JSON: {}", e));
                println!("{}", to_json(&response));
                let _ = stdout.flush();
                continue;
            }
        };

        if request.cmd == "quit" {
            break;
        }

        // 处理命令
        let response = handle_request(&request)
            .unwrap_or_else(|e| ServerResponse::error(&e.to_string()));

        // 返回响应
        println!("{}", to_json(&response));
        let _ = stdout.flush();
    }
}

fn handle_request(request: &ServerRequest) -> BoardResult<ServerResponse> {
    let fen = request.fen.as_deref().unwrap_or(FIRST_FEN);
    let response = match request.cmd.as_str() {
        "moves" => {
            let color = match request.color.as_deref() {
                Some(s) => match s.parse::<Color>() {
                    Ok(c) => c,
                    Err(e) => return Ok(ServerResponse::error(&e)),
                },
                None => fen_plus_turn(fen)?,
            };
            ServerResponse::success_moves(move_infos(fen, color)?)
        }
        "zh" => match request.iccs.as_deref() {
            Some(iccs) => ServerResponse::success_zh(iccs_to_zh(fen, iccs)?),
            None => ServerResponse::error("Missing field: iccs"),
        },
        "iccs" => match request.zh.as_deref() {
            Some(zh) => ServerResponse::success_iccs(zh_to_iccs(fen, zh)?),
            None => ServerResponse::error("Missing field: zh"),
        },
        "change" => match request.kind.as_deref().map(str::parse::<ChangeType>) {
            Some(Ok(kind)) => ServerResponse::success_fen(change_fen(fen, kind)?),
            Some(Err(e)) => ServerResponse::error(&e),
            None => ServerResponse::error("Missing field: kind"),
        },
        "status" => {
            let mut board = Board::from_fen(fen)?;
            let red = side_status(&mut board, Color::Red)?;
            let black = side_status(&mut board, Color::Black)?;
            ServerResponse::success_status(red, black)
        }
        _ => ServerResponse::error(&format!("Unknown command: {}", request.cmd)),
    };
    Ok(response)
}
