//! 并发安全性测试
//!
//! 解析与格式化都是纯函数，验证它们在多线程、多任务下互不干扰

use samp::{
    parse, parse_async, response_with_trace_path, CorrelationId, Message, MessageBuilder, Parser,
    CORRELATION_ID_HEADER, TRACE_HEADER,
};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;
use tokio::time::timeout;

fn request(i: usize) -> Vec<u8> {
    MessageBuilder::new()
        .with_action(format!("/order/{i}"))
        .with_correlation_id(format!("corr-{i:04}"))
        .with_header(TRACE_HEADER, format!("gateway-{i}"))
        .with_body(format!("payload {i}"))
        .format()
}

/// 测试并发生成关联ID的唯一性
#[tokio::test]
async fn test_concurrent_correlation_id_uniqueness() {
    const TASK_COUNT: usize = 10;
    const IDS_PER_TASK: usize = 1000;

    let ids = Arc::new(Mutex::new(HashSet::new()));
    let mut handles = vec![];

    for _ in 0..TASK_COUNT {
        let ids_clone = Arc::clone(&ids);
        handles.push(tokio::spawn(async move {
            let local_ids: Vec<CorrelationId> =
                (0..IDS_PER_TASK).map(|_| CorrelationId::new()).collect();

            let mut global_ids = ids_clone.lock().unwrap();
            for id in local_ids {
                assert!(global_ids.insert(id), "发现重复的关联ID");
            }
        }));
    }

    for handle in handles {
        handle.await.unwrap();
    }

    assert_eq!(ids.lock().unwrap().len(), TASK_COUNT * IDS_PER_TASK);
}

/// 测试多个线程共享同一个解析器和同一条消息
#[test]
fn test_shared_parser_and_message_across_threads() {
    let parser = Arc::new(Parser::new());
    let shared: Arc<Message> = Arc::new(parse(&request(0)).unwrap());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let parser = Arc::clone(&parser);
            let shared = Arc::clone(&shared);
            thread::spawn(move || {
                for i in 0..200 {
                    let n = t * 1000 + i;
                    let message = parser.parse(&request(n)).unwrap();
                    assert_eq!(message.action(), format!("/order/{n}"));
                    assert_eq!(
                        message.header(CORRELATION_ID_HEADER),
                        Some(format!("corr-{n:04}").as_str())
                    );

                    let reply = response_with_trace_path(&shared, &format!("worker-{t}")).build();
                    assert_eq!(reply.trace_paths(), vec!["gateway-0".to_string(), format!("worker-{t}")]);
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }
}

/// 测试并发任务中的异步解析，输入按随机的小块到达
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_async_parsing() {
    const CONCURRENT_TASKS: usize = 50;

    let mut handles = vec![];
    for i in 0..CONCURRENT_TASKS {
        handles.push(tokio::spawn(async move {
            let (mut writer, reader) = tokio::io::duplex(16);
            let bytes = request(i);

            let producer = tokio::spawn(async move {
                use tokio::io::AsyncWriteExt;
                for chunk in bytes.chunks(7) {
                    tokio::time::sleep(Duration::from_millis(fastrand::u64(0..3))).await;
                    writer.write_all(chunk).await.unwrap();
                }
                // writer 被丢弃后读端收到流结束
            });

            let message = parse_async(tokio::io::BufReader::new(reader)).await.unwrap();
            producer.await.unwrap();

            assert_eq!(message.action(), format!("/order/{i}"));
            assert_eq!(message.body(), Some(format!("payload {i}\n").as_bytes()));
        }));
    }

    for handle in handles {
        timeout(Duration::from_secs(10), handle)
            .await
            .expect("异步解析超时")
            .unwrap();
    }
}
