// ==========================================
// 药房效期排班系统 - 命令行入口
// ==========================================
// 用法: pharmacy-scheduler <请求文件.json>
// 职责: 读取排班请求文件,运行两条排班流水线,
//       把完整结果以 JSON 输出到标准输出
// 红线: 所有 I/O 止于这里,核心库保持纯计算
// ==========================================

use anyhow::Context;
use pharmacy_scheduler::{
    logging, InventoryImporter, ScheduleOrchestrator, SchedulerConfig,
};

fn main() -> anyhow::Result<()> {
    // 初始化日志系统
    logging::init();

    tracing::info!("==================================================");
    tracing::info!("{}", pharmacy_scheduler::APP_NAME);
    tracing::info!("系统版本: {}", pharmacy_scheduler::VERSION);
    tracing::info!("==================================================");

    // 读取请求文件
    let path = std::env::args()
        .nth(1)
        .context("用法: pharmacy-scheduler <请求文件.json>")?;
    tracing::info!("读取排班请求: {}", path);
    let raw = std::fs::read_to_string(&path).with_context(|| format!("无法读取文件: {}", path))?;

    // 解析 + 校验
    let request = InventoryImporter::parse_request(&raw)?;

    // 执行排班
    let orchestrator = ScheduleOrchestrator::new(SchedulerConfig::default());
    let outcome = orchestrator.run(&request.items, &request.dispensers, request.today)?;

    // 输出结果
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}
