use super::*;
use crate::OrderStatus;
use crate::gateway::tests::{MemorySession, MockHttpClient, gateway};
use crate::protocol::HttpMethod;
use crate::status::StatusKind;
use serde_json::json;
use std::cell::Cell;

// =========================================================
// 辅助函数
// =========================================================

fn people_json() -> serde_json::Value {
    json!([
        { "id": 1, "nome": "Ana Silva", "email": "ana@teste.com", "cpf": "12345678901", "idade": 30 },
        { "id": 2, "nome": "Bruno", "email": "bruno@teste.com", "cpf": "10987654321", "idade": null }
    ])
}

fn orders_json() -> serde_json::Value {
    json!([
        { "id": 10, "descricao": "Teclado", "valor": 250.0, "status": "PAGO", "pessoaId": 1 },
        { "id": 11, "descricao": "Mouse", "valor": 49.9, "status": "ABERTO", "pessoaId": 1 }
    ])
}

fn valid_person_draft() -> PersonDraft {
    PersonDraft {
        name: "Carla".into(),
        email: "carla@teste.com".into(),
        cpf: "123.456.789-01".into(),
        age: "41".into(),
    }
}

fn valid_order_draft() -> OrderDraft {
    OrderDraft {
        description: "Monitor".into(),
        value: "1.200,00".into(),
        status: OrderStatus::Open,
        person_id: "2".into(),
    }
}

fn always_confirm(_: &str) -> bool {
    true
}

// =========================================================
// 人员：加载
// =========================================================

#[tokio::test]
async fn test_people_load_builds_linkage() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Get, "/pessoas", 200, people_json());
    client.mock_response(HttpMethod::Get, "/pedidos", 200, orders_json());
    let gw = gateway(&client, &session);

    let snapshot = PeopleService::new(&gw).load().await;

    assert_eq!(snapshot.people.len(), 2);
    assert_eq!(snapshot.linkage.count(1), 2);
    assert!(!snapshot.linkage.is_linked(2));
}

#[tokio::test]
async fn test_people_load_tolerates_failures() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Get, "/pessoas", 200, people_json());
    client.mock_network_error(HttpMethod::Get, "/pedidos");
    let gw = gateway(&client, &session);

    let snapshot = PeopleService::new(&gw).load().await;

    assert_eq!(snapshot.people.len(), 2);
    assert_eq!(snapshot.linkage, LinkageMap::default());
}

// =========================================================
// 人员：提交
// =========================================================

#[tokio::test]
async fn test_person_submit_invalid_cpf_sends_nothing() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    let gw = gateway(&client, &session);

    let draft = PersonDraft {
        cpf: "123".into(),
        ..valid_person_draft()
    };
    let outcome = PeopleService::new(&gw).submit(&draft, None).await;

    assert!(!outcome.applied);
    assert_eq!(outcome.status.unwrap().kind, StatusKind::Error);
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn test_person_create_then_reload() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Post, "/pessoas", 201, json!({ "id": 3 }));
    client.mock_response(HttpMethod::Get, "/pessoas", 200, people_json());
    let gw = gateway(&client, &session);

    let draft = PersonDraft {
        cpf: "12345678901".into(),
        ..valid_person_draft()
    };
    let outcome = PeopleService::new(&gw).submit(&draft, None).await;

    assert!(outcome.applied);
    assert_eq!(outcome.status, Some(StatusMessage::success(MSG_PERSON_CREATED)));
    assert_eq!(outcome.refreshed.map(|p| p.len()), Some(2));

    // 先提交，再重新加载
    let reqs = client.requests();
    assert_eq!(reqs.len(), 2);
    assert_eq!(reqs[0].method, HttpMethod::Post);
    let body: serde_json::Value = serde_json::from_str(reqs[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({ "nome": "Carla", "email": "carla@teste.com", "cpf": "12345678901", "idade": 41 })
    );
    assert_eq!(reqs[1].method, HttpMethod::Get);
}

#[tokio::test]
async fn test_person_update_uses_put() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Put, "/pessoas/2", 200, json!({}));
    client.mock_response(HttpMethod::Get, "/pessoas", 200, people_json());
    let gw = gateway(&client, &session);

    let outcome = PeopleService::new(&gw)
        .submit(&valid_person_draft(), Some(2))
        .await;

    assert_eq!(outcome.status, Some(StatusMessage::success(MSG_PERSON_UPDATED)));
    assert_eq!(client.requests()[0].url, "http://api.test/pessoas/2");
}

#[tokio::test]
async fn test_person_create_keeps_success_when_reload_fails() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Post, "/pessoas", 201, json!({ "id": 3 }));
    client.mock_network_error(HttpMethod::Get, "/pessoas");
    let gw = gateway(&client, &session);

    let outcome = PeopleService::new(&gw).submit(&valid_person_draft(), None).await;

    assert!(outcome.applied);
    assert_eq!(outcome.status, Some(StatusMessage::success(MSG_PERSON_CREATED)));
    assert_eq!(outcome.refreshed, None);
    assert_eq!(client.request_count(), 2);
}

#[tokio::test]
async fn test_person_submit_server_failure_is_generic() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Post, "/pessoas", 400, json!({ "message": "cpf duplicado" }));
    let gw = gateway(&client, &session);

    let outcome = PeopleService::new(&gw).submit(&valid_person_draft(), None).await;

    assert!(!outcome.applied);
    assert_eq!(outcome.status, Some(StatusMessage::error(MSG_PERSON_SAVE_FAILED)));
    // 失败时不重新加载
    assert_eq!(client.request_count(), 1);
}

#[tokio::test]
async fn test_person_submit_unauthorized_shows_nothing() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Post, "/pessoas", 401, json!({}));
    let gw = gateway(&client, &session);

    let outcome = PeopleService::new(&gw).submit(&valid_person_draft(), None).await;

    assert_eq!(outcome.status, None);
    assert!(!session.is_authenticated());
    assert_eq!(session.redirects.get(), 1);
}

// =========================================================
// 人员：删除
// =========================================================

#[tokio::test]
async fn test_person_delete_declined() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    let gw = gateway(&client, &session);

    let outcome = PeopleService::new(&gw)
        .delete(2, &LinkageMap::default(), |_| false)
        .await;

    assert!(outcome.is_none());
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn test_person_delete_preempted_by_linkage() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Get, "/pessoas", 200, people_json());
    client.mock_response(HttpMethod::Get, "/pedidos", 200, orders_json());
    let gw = gateway(&client, &session);
    let service = PeopleService::new(&gw);

    let snapshot = service.load().await;
    let asked = Cell::new(false);
    let outcome = service
        .delete(1, &snapshot.linkage, |question| {
            asked.set(true);
            question == CONFIRM_DELETE_PERSON
        })
        .await
        .unwrap();

    assert!(asked.get());
    assert_eq!(outcome.status, Some(StatusMessage::error(MSG_PERSON_LINKED)));
    // 只有挂载时的两个 GET，没有 DELETE
    assert!(client.requests().iter().all(|r| r.method == HttpMethod::Get));
}

#[tokio::test]
async fn test_person_delete_success_reloads() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Delete, "/pessoas/2", 204, serde_json::Value::Null);
    client.mock_response(HttpMethod::Get, "/pessoas", 200, people_json());
    let gw = gateway(&client, &session);

    let outcome = PeopleService::new(&gw)
        .delete(2, &LinkageMap::default(), always_confirm)
        .await
        .unwrap();

    assert!(outcome.applied);
    assert_eq!(outcome.status, Some(StatusMessage::success(MSG_PERSON_DELETED)));
    assert!(outcome.refreshed.is_some());
    let reqs = client.requests();
    assert_eq!(reqs[0].method, HttpMethod::Delete);
    assert_eq!(reqs[1].method, HttpMethod::Get);
}

#[tokio::test]
async fn test_person_delete_keeps_success_when_reload_fails() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Delete, "/pessoas/2", 204, serde_json::Value::Null);
    client.mock_response(HttpMethod::Get, "/pessoas", 500, json!({}));
    let gw = gateway(&client, &session);

    let outcome = PeopleService::new(&gw)
        .delete(2, &LinkageMap::default(), always_confirm)
        .await
        .unwrap();

    assert!(outcome.applied);
    assert_eq!(outcome.status, Some(StatusMessage::success(MSG_PERSON_DELETED)));
    assert_eq!(outcome.refreshed, None);
}

#[tokio::test]
async fn test_person_delete_conflict_prefers_server_detail() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(
        HttpMethod::Delete,
        "/pessoas/2",
        409,
        json!({ "detail": "Pessoa possui pedidos", "message": "Conflict" }),
    );
    let gw = gateway(&client, &session);

    let outcome = PeopleService::new(&gw)
        .delete(2, &LinkageMap::default(), always_confirm)
        .await
        .unwrap();

    assert_eq!(outcome.status, Some(StatusMessage::error("Pessoa possui pedidos")));
}

#[tokio::test]
async fn test_person_delete_status_mapping_defaults() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Delete, "/pessoas/1", 409, serde_json::Value::Null);
    client.mock_response(HttpMethod::Delete, "/pessoas/2", 404, json!({}));
    client.mock_response(HttpMethod::Delete, "/pessoas/3", 500, json!({ "detail": "ignorado" }));
    let gw = gateway(&client, &session);
    let service = PeopleService::new(&gw);
    let linkage = LinkageMap::default();

    let conflict = service.delete(1, &linkage, always_confirm).await.unwrap();
    let missing = service.delete(2, &linkage, always_confirm).await.unwrap();
    let other = service.delete(3, &linkage, always_confirm).await.unwrap();

    assert_eq!(conflict.status, Some(StatusMessage::error(MSG_PERSON_LINKED)));
    assert_eq!(missing.status, Some(StatusMessage::error(MSG_PERSON_NOT_FOUND)));
    assert_eq!(other.status, Some(StatusMessage::error(MSG_PERSON_DELETE_FAILED)));
}

// =========================================================
// 订单
// =========================================================

#[tokio::test]
async fn test_orders_load_and_owner_name() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Get, "/pessoas", 200, people_json());
    client.mock_response(HttpMethod::Get, "/pedidos", 200, orders_json());
    let gw = gateway(&client, &session);

    let snapshot = OrdersService::new(&gw).load().await;

    assert_eq!(snapshot.orders.len(), 2);
    assert_eq!(snapshot.owner_name(&snapshot.orders[0]), Some("Ana Silva"));
}

#[tokio::test]
async fn test_order_create_sends_unmasked_value() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Post, "/pedidos", 201, json!({}));
    client.mock_response(HttpMethod::Get, "/pedidos", 200, orders_json());
    let gw = gateway(&client, &session);
    let people: Vec<Person> = serde_json::from_value(people_json()).unwrap();

    let outcome = OrdersService::new(&gw)
        .submit(&valid_order_draft(), None, &people)
        .await;

    assert_eq!(outcome.status, Some(StatusMessage::success(MSG_ORDER_CREATED)));
    let body: serde_json::Value =
        serde_json::from_str(client.requests()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(
        body,
        json!({ "descricao": "Monitor", "valor": 1200.0, "status": "ABERTO", "pessoaId": 2 })
    );
}

#[tokio::test]
async fn test_order_submit_without_owner_sends_nothing() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    let gw = gateway(&client, &session);

    let draft = OrderDraft {
        person_id: String::new(),
        ..valid_order_draft()
    };
    let outcome = OrdersService::new(&gw).submit(&draft, None, &[]).await;

    assert!(!outcome.applied);
    assert_eq!(client.request_count(), 0);
}

#[tokio::test]
async fn test_order_update_keeps_success_when_reload_fails() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Put, "/pedidos/10", 200, json!({}));
    client.mock_network_error(HttpMethod::Get, "/pedidos");
    let gw = gateway(&client, &session);

    let outcome = OrdersService::new(&gw)
        .submit(&valid_order_draft(), Some(10), &[])
        .await;

    assert!(outcome.applied);
    assert_eq!(outcome.status, Some(StatusMessage::success(MSG_ORDER_UPDATED)));
    assert_eq!(outcome.refreshed, None);
    assert_eq!(client.requests()[0].method, HttpMethod::Put);
}

#[tokio::test]
async fn test_order_update_failure_keeps_generic_message() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_network_error(HttpMethod::Put, "/pedidos/10");
    let gw = gateway(&client, &session);

    let outcome = OrdersService::new(&gw)
        .submit(&valid_order_draft(), Some(10), &[])
        .await;

    assert_eq!(outcome.status, Some(StatusMessage::error(MSG_ORDER_SAVE_FAILED)));
}

#[tokio::test]
async fn test_order_delete_mapping() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Delete, "/pedidos/10", 204, serde_json::Value::Null);
    client.mock_response(HttpMethod::Get, "/pedidos", 200, orders_json());
    client.mock_response(HttpMethod::Delete, "/pedidos/99", 404, json!({ "message": "Pedido 99 não existe" }));
    let gw = gateway(&client, &session);
    let service = OrdersService::new(&gw);

    let deleted = service.delete(10, always_confirm).await.unwrap();
    let missing = service.delete(99, always_confirm).await.unwrap();

    assert_eq!(deleted.status, Some(StatusMessage::success(MSG_ORDER_DELETED)));
    assert_eq!(deleted.refreshed.map(|o| o.len()), Some(2));
    assert_eq!(missing.status, Some(StatusMessage::error("Pedido 99 não existe")));
}

#[tokio::test]
async fn test_order_delete_conflict_and_server_error_defaults() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Delete, "/pedidos/10", 409, serde_json::Value::Null);
    client.mock_response(HttpMethod::Delete, "/pedidos/11", 503, json!({ "detail": "ignorado" }));
    let gw = gateway(&client, &session);
    let service = OrdersService::new(&gw);

    let conflict = service.delete(10, always_confirm).await.unwrap();
    let unavailable = service.delete(11, always_confirm).await.unwrap();

    assert!(!conflict.applied);
    assert_eq!(conflict.status, Some(StatusMessage::error(MSG_ORDER_CONFLICT)));
    assert_eq!(unavailable.status, Some(StatusMessage::error(MSG_ORDER_DELETE_FAILED)));
    // 失败时不重新加载
    assert!(client.requests().iter().all(|r| r.method == HttpMethod::Delete));
}

#[tokio::test]
async fn test_order_delete_keeps_success_when_reload_fails() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("tok");
    client.mock_response(HttpMethod::Delete, "/pedidos/10", 204, serde_json::Value::Null);
    client.mock_network_error(HttpMethod::Get, "/pedidos");
    let gw = gateway(&client, &session);

    let outcome = OrdersService::new(&gw).delete(10, always_confirm).await.unwrap();

    assert!(outcome.applied);
    assert_eq!(outcome.status, Some(StatusMessage::success(MSG_ORDER_DELETED)));
    assert_eq!(outcome.refreshed, None);
}

// =========================================================
// 账号
// =========================================================

#[tokio::test]
async fn test_login_returns_token() {
    let client = MockHttpClient::new();
    let session = MemorySession::anonymous();
    client.mock_response(
        HttpMethod::Post,
        "/auth/login",
        200,
        json!({ "token": "jwt-123", "type": "Bearer" }),
    );
    let gw = gateway(&client, &session);

    let token = AccountService::new(&gw).login("a@b.c", "segredo").await;

    assert_eq!(token, Ok("jwt-123".to_string()));
    let body: serde_json::Value =
        serde_json::from_str(client.requests()[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({ "email": "a@b.c", "senha": "segredo" }));
}

#[tokio::test]
async fn test_login_failures() {
    let client = MockHttpClient::new();
    let session = MemorySession::anonymous();
    client.mock_response(HttpMethod::Post, "/auth/login", 401, json!({}));
    let gw = gateway(&client, &session);
    let account = AccountService::new(&gw);

    assert_eq!(
        account.login("", "x").await,
        Err(StatusMessage::error(MSG_LOGIN_MISSING_FIELDS))
    );
    assert_eq!(client.request_count(), 0);

    assert_eq!(
        account.login("a@b.c", "errada").await,
        Err(StatusMessage::error(MSG_LOGIN_INVALID))
    );
    assert_eq!(session.redirects.get(), 0);
}

#[tokio::test]
async fn test_register_success_and_server_message() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("admin-token");
    client.mock_response(HttpMethod::Post, "/auth/register", 201, json!({}));
    let gw = gateway(&client, &session);

    let draft = UserDraft {
        email: "novo@teste.com".into(),
        password: "123456".into(),
        role: crate::Role::Admin,
    };
    let status = AccountService::new(&gw).register(&draft).await;

    assert_eq!(status, Some(StatusMessage::success(MSG_USER_CREATED)));
    let reqs = client.requests();
    assert_eq!(reqs[0].header(crate::HEADER_AUTHORIZATION), Some("Bearer admin-token"));
    let body: serde_json::Value = serde_json::from_str(reqs[0].body.as_deref().unwrap()).unwrap();
    assert_eq!(body["role"], json!("ADMIN"));

    client.mock_response(HttpMethod::Post, "/auth/register", 403, json!({ "detail": "Somente ADMIN" }));
    let status = AccountService::new(&gw).register(&draft).await;
    assert_eq!(status, Some(StatusMessage::error("Somente ADMIN")));
}

#[tokio::test]
async fn test_login_transport_failure() {
    let client = MockHttpClient::new();
    let session = MemorySession::anonymous();
    client.mock_network_error(HttpMethod::Post, "/auth/login");
    let gw = gateway(&client, &session);

    let result = AccountService::new(&gw).login("a@b.c", "segredo").await;

    assert_eq!(result, Err(StatusMessage::error(MSG_LOGIN_FAILED)));
    assert_eq!(session.redirects.get(), 0);
}

fn user_draft() -> UserDraft {
    UserDraft {
        email: "novo@teste.com".into(),
        password: "123456".into(),
        role: crate::Role::User,
    }
}

#[tokio::test]
async fn test_register_unauthorized_redirects_silently() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("expirado");
    client.mock_response(HttpMethod::Post, "/auth/register", 401, json!({ "message": "token expirado" }));
    let gw = gateway(&client, &session);

    let status = AccountService::new(&gw).register(&user_draft()).await;

    assert_eq!(status, None);
    assert!(!session.is_authenticated());
    assert_eq!(session.redirects.get(), 1);
}

#[tokio::test]
async fn test_register_transport_failure() {
    let client = MockHttpClient::new();
    let session = MemorySession::logged_in("admin-token");
    client.mock_network_error(HttpMethod::Post, "/auth/register");
    let gw = gateway(&client, &session);

    let status = AccountService::new(&gw).register(&user_draft()).await;

    assert_eq!(status, Some(StatusMessage::error(MSG_USER_FAILED)));
    assert!(session.is_authenticated());
    assert_eq!(session.redirects.get(), 0);
}
