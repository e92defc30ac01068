//! Mock da API REST do SisReservas para os testes de integração.
//!
//! Sobe um `actix-web` numa porta efêmera, guarda tudo em memória e registra
//! cada requisição recebida (método, caminho bruto, query e corpo JSON) para
//! que os testes possam conferir o formato exato enviado pelo cliente.

#![allow(dead_code)]

use actix_web::dev::ServerHandle;
use actix_web::{delete, get, patch, post, put, web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::Value;
use std::collections::{HashMap, HashSet};
use std::net::TcpListener;
use std::sync::{Mutex, MutexGuard};

use sisreservas::api::ApiClient;
use sisreservas::config::ApiConfig;
use sisreservas::models::{
    Cliente, ClienteForm, Profissional, ProfissionalForm, Reserva, ReservaPayload, StatusReserva,
};

const CREATED_AT: &str = "2024-03-01T10:00:00";

/// Requisição recebida pelo mock
#[derive(Debug, Clone, PartialEq)]
pub struct Recorded {
    pub method: String,
    /// Caminho como chegou, ainda codificado
    pub path: String,
    pub query: String,
    pub body: Option<Value>,
}

#[derive(Default)]
struct Store {
    clientes: Vec<Cliente>,
    profissionais: Vec<Profissional>,
    reservas: Vec<Reserva>,
    next_id: i64,
    requests: Vec<Recorded>,
    failing: HashSet<String>,
}

impl Store {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

#[derive(Default)]
pub struct MockApi {
    store: Mutex<Store>,
}

type Query = web::Query<HashMap<String, String>>;

impl MockApi {
    fn store(&self) -> MutexGuard<'_, Store> {
        self.store.lock().expect("mock store poisoned")
    }

    /// Faz `"MÉTODO /caminho"` (caminho sem o prefixo `/api`) responder 500
    pub fn fail(&self, route: &str) {
        self.store().failing.insert(route.to_string());
    }

    pub fn recover(&self, route: &str) {
        self.store().failing.remove(route);
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.store().requests.clone()
    }

    pub fn clear_requests(&self) {
        self.store().requests.clear();
    }

    /// Última requisição com o método informado
    pub fn last(&self, method: &str) -> Option<Recorded> {
        self.store()
            .requests
            .iter()
            .rev()
            .find(|r| r.method == method)
            .cloned()
    }

    pub fn reservas(&self) -> Vec<Reserva> {
        self.store().reservas.clone()
    }

    pub fn profissionais(&self) -> Vec<Profissional> {
        self.store().profissionais.clone()
    }

    pub fn seed_cliente(&self, nome: &str, telefone: &str, email: &str) -> Cliente {
        let mut store = self.store();
        let cliente = Cliente {
            id: Some(store.next_id()),
            nome: nome.to_string(),
            telefone: telefone.to_string(),
            email: email.to_string(),
            criado_em: Some(CREATED_AT.to_string()),
        };
        store.clientes.push(cliente.clone());
        cliente
    }

    pub fn seed_profissional(&self, nome: &str, especialidade: &str, ativo: bool) -> Profissional {
        let mut store = self.store();
        let profissional = Profissional {
            id: Some(store.next_id()),
            nome: nome.to_string(),
            especialidade: especialidade.to_string(),
            telefone: None,
            email: Some(format!("{}@ex.com", nome.to_lowercase())),
            ativo,
            criado_em: Some(CREATED_AT.to_string()),
            atualizado_em: None,
        };
        store.profissionais.push(profissional.clone());
        profissional
    }

    pub fn seed_reserva(
        &self,
        cliente: &Cliente,
        profissional: &Profissional,
        data: &str,
        hora: &str,
        status: StatusReserva,
    ) -> Reserva {
        let mut store = self.store();
        let reserva = Reserva {
            id: Some(store.next_id()),
            cliente: cliente.clone(),
            profissional: profissional.clone(),
            data: data.to_string(),
            hora: hora.to_string(),
            observacoes: None,
            status,
            criado_em: Some(CREATED_AT.to_string()),
            atualizado_em: None,
        };
        store.reservas.push(reserva.clone());
        reserva
    }

    /// Registra a requisição; devolve a resposta de falha se a rota estiver marcada
    fn enter(&self, req: &HttpRequest, body: Option<&Value>) -> Option<HttpResponse> {
        let mut store = self.store();
        let path = req.uri().path().to_string();
        store.requests.push(Recorded {
            method: req.method().to_string(),
            path: path.clone(),
            query: req.query_string().to_string(),
            body: body.cloned(),
        });

        let route = format!("{} {}", req.method(), path.trim_start_matches("/api"));
        store
            .failing
            .contains(&route)
            .then(|| HttpResponse::InternalServerError().body("falha simulada"))
    }
}

fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(serde_json::json!({ "erro": "Registro não encontrado" }))
}

fn bad_request(message: impl ToString) -> HttpResponse {
    HttpResponse::BadRequest().json(serde_json::json!({ "erro": message.to_string() }))
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// ---------------------------------------------------------------- clientes

#[get("/clientes")]
async fn clientes_list(api: web::Data<MockApi>, req: HttpRequest) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    HttpResponse::Ok().json(&api.store().clientes)
}

#[get("/clientes/buscar")]
async fn clientes_search(api: web::Data<MockApi>, req: HttpRequest, query: Query) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    let filtro = query.get("filtro").cloned().unwrap_or_default();
    let found: Vec<Cliente> = api
        .store()
        .clientes
        .iter()
        .filter(|c| contains_ci(&c.nome, &filtro) || contains_ci(&c.email, &filtro))
        .cloned()
        .collect();
    HttpResponse::Ok().json(found)
}

#[get("/clientes/email/{email}")]
async fn clientes_by_email(
    api: web::Data<MockApi>,
    req: HttpRequest,
    email: web::Path<String>,
) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    let store = api.store();
    match store.clientes.iter().find(|c| c.email == *email) {
        Some(cliente) => HttpResponse::Ok().json(cliente),
        None => not_found(),
    }
}

#[get("/clientes/{id}")]
async fn clientes_get(api: web::Data<MockApi>, req: HttpRequest, id: web::Path<i64>) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    let store = api.store();
    match store.clientes.iter().find(|c| c.id == Some(*id)) {
        Some(cliente) => HttpResponse::Ok().json(cliente),
        None => not_found(),
    }
}

#[post("/clientes")]
async fn clientes_create(api: web::Data<MockApi>, req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    if let Some(failure) = api.enter(&req, Some(&body.0)) {
        return failure;
    }
    let form: ClienteForm = match serde_json::from_value(body.into_inner()) {
        Ok(form) => form,
        Err(e) => return bad_request(e),
    };
    let mut store = api.store();
    let cliente = Cliente {
        id: Some(store.next_id()),
        nome: form.nome,
        telefone: form.telefone,
        email: form.email,
        criado_em: Some(CREATED_AT.to_string()),
    };
    store.clientes.push(cliente.clone());
    HttpResponse::Created().json(cliente)
}

#[put("/clientes/{id}")]
async fn clientes_update(
    api: web::Data<MockApi>,
    req: HttpRequest,
    id: web::Path<i64>,
    body: web::Json<Value>,
) -> HttpResponse {
    if let Some(failure) = api.enter(&req, Some(&body.0)) {
        return failure;
    }
    let form: ClienteForm = match serde_json::from_value(body.into_inner()) {
        Ok(form) => form,
        Err(e) => return bad_request(e),
    };
    let mut store = api.store();
    match store.clientes.iter_mut().find(|c| c.id == Some(*id)) {
        Some(cliente) => {
            cliente.nome = form.nome;
            cliente.telefone = form.telefone;
            cliente.email = form.email;
            HttpResponse::Ok().json(cliente.clone())
        }
        None => not_found(),
    }
}

#[delete("/clientes/{id}")]
async fn clientes_delete(api: web::Data<MockApi>, req: HttpRequest, id: web::Path<i64>) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    api.store().clientes.retain(|c| c.id != Some(*id));
    HttpResponse::NoContent().finish()
}

// ----------------------------------------------------------- profissionais

#[get("/profissionais")]
async fn profissionais_list(api: web::Data<MockApi>, req: HttpRequest) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    HttpResponse::Ok().json(&api.store().profissionais)
}

#[get("/profissionais/ativos")]
async fn profissionais_active(api: web::Data<MockApi>, req: HttpRequest) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    let ativos: Vec<Profissional> = api
        .store()
        .profissionais
        .iter()
        .filter(|p| p.ativo)
        .cloned()
        .collect();
    HttpResponse::Ok().json(ativos)
}

#[get("/profissionais/buscar")]
async fn profissionais_search(api: web::Data<MockApi>, req: HttpRequest, query: Query) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    let found: Vec<Profissional> = api
        .store()
        .profissionais
        .iter()
        .filter(|p| query.get("especialidade").map_or(true, |e| p.especialidade == *e))
        .filter(|p| query.get("filtro").map_or(true, |f| contains_ci(&p.nome, f)))
        .cloned()
        .collect();
    HttpResponse::Ok().json(found)
}

#[get("/profissionais/email/{email}")]
async fn profissionais_by_email(
    api: web::Data<MockApi>,
    req: HttpRequest,
    email: web::Path<String>,
) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    let store = api.store();
    match store
        .profissionais
        .iter()
        .find(|p| p.email.as_deref() == Some(email.as_str()))
    {
        Some(profissional) => HttpResponse::Ok().json(profissional),
        None => not_found(),
    }
}

#[get("/profissionais/especialidade/{especialidade}")]
async fn profissionais_by_especialidade(
    api: web::Data<MockApi>,
    req: HttpRequest,
    especialidade: web::Path<String>,
) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    let found: Vec<Profissional> = api
        .store()
        .profissionais
        .iter()
        .filter(|p| p.especialidade == *especialidade)
        .cloned()
        .collect();
    HttpResponse::Ok().json(found)
}

#[get("/profissionais/{id}")]
async fn profissionais_get(api: web::Data<MockApi>, req: HttpRequest, id: web::Path<i64>) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    let store = api.store();
    match store.profissionais.iter().find(|p| p.id == Some(*id)) {
        Some(profissional) => HttpResponse::Ok().json(profissional),
        None => not_found(),
    }
}

#[post("/profissionais")]
async fn profissionais_create(
    api: web::Data<MockApi>,
    req: HttpRequest,
    body: web::Json<Value>,
) -> HttpResponse {
    if let Some(failure) = api.enter(&req, Some(&body.0)) {
        return failure;
    }
    let form: ProfissionalForm = match serde_json::from_value(body.into_inner()) {
        Ok(form) => form,
        Err(e) => return bad_request(e),
    };
    let mut store = api.store();
    let profissional = Profissional {
        id: Some(store.next_id()),
        nome: form.nome,
        especialidade: form.especialidade,
        telefone: form.telefone,
        email: form.email,
        ativo: form.ativo,
        criado_em: Some(CREATED_AT.to_string()),
        atualizado_em: None,
    };
    store.profissionais.push(profissional.clone());
    HttpResponse::Created().json(profissional)
}

#[put("/profissionais/{id}")]
async fn profissionais_update(
    api: web::Data<MockApi>,
    req: HttpRequest,
    id: web::Path<i64>,
    body: web::Json<Value>,
) -> HttpResponse {
    if let Some(failure) = api.enter(&req, Some(&body.0)) {
        return failure;
    }
    let form: ProfissionalForm = match serde_json::from_value(body.into_inner()) {
        Ok(form) => form,
        Err(e) => return bad_request(e),
    };
    let mut store = api.store();
    match store.profissionais.iter_mut().find(|p| p.id == Some(*id)) {
        Some(profissional) => {
            profissional.nome = form.nome;
            profissional.especialidade = form.especialidade;
            profissional.telefone = form.telefone;
            profissional.email = form.email;
            profissional.ativo = form.ativo;
            profissional.atualizado_em = Some(CREATED_AT.to_string());
            HttpResponse::Ok().json(profissional.clone())
        }
        None => not_found(),
    }
}

#[patch("/profissionais/{id}/ativo")]
async fn profissionais_set_active(
    api: web::Data<MockApi>,
    req: HttpRequest,
    id: web::Path<i64>,
    query: Query,
) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    let ativo = match query.get("ativo").map(|v| v.parse::<bool>()) {
        Some(Ok(ativo)) => ativo,
        _ => return bad_request("parâmetro 'ativo' inválido"),
    };
    let mut store = api.store();
    match store.profissionais.iter_mut().find(|p| p.id == Some(*id)) {
        Some(profissional) => {
            profissional.ativo = ativo;
            HttpResponse::Ok().json(profissional.clone())
        }
        None => not_found(),
    }
}

#[delete("/profissionais/{id}")]
async fn profissionais_delete(
    api: web::Data<MockApi>,
    req: HttpRequest,
    id: web::Path<i64>,
) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    api.store().profissionais.retain(|p| p.id != Some(*id));
    HttpResponse::NoContent().finish()
}

// ---------------------------------------------------------------- reservas

fn filtered(api: &MockApi, keep: impl Fn(&Reserva) -> bool) -> HttpResponse {
    let found: Vec<Reserva> = api.store().reservas.iter().filter(|r| keep(r)).cloned().collect();
    HttpResponse::Ok().json(found)
}

/// Resolve as referências `{ id }` do corpo contra os registros guardados
fn resolve(store: &Store, payload: &ReservaPayload) -> Result<(Cliente, Profissional), HttpResponse> {
    let cliente = store
        .clientes
        .iter()
        .find(|c| c.id == Some(payload.cliente.id))
        .cloned()
        .ok_or_else(|| bad_request("Cliente não encontrado"))?;
    let profissional = store
        .profissionais
        .iter()
        .find(|p| p.id == Some(payload.profissional.id))
        .cloned()
        .ok_or_else(|| bad_request("Profissional não encontrado"))?;
    Ok((cliente, profissional))
}

#[get("/reservas")]
async fn reservas_list(api: web::Data<MockApi>, req: HttpRequest) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    filtered(&api, |_| true)
}

#[get("/reservas/periodo")]
async fn reservas_by_period(api: web::Data<MockApi>, req: HttpRequest, query: Query) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    let (Some(inicio), Some(fim)) = (query.get("dataInicio"), query.get("dataFim")) else {
        return bad_request("dataInicio e dataFim são obrigatórios");
    };
    filtered(&api, |r| r.data >= *inicio && r.data <= *fim)
}

#[get("/reservas/cliente/{id}")]
async fn reservas_by_cliente(api: web::Data<MockApi>, req: HttpRequest, id: web::Path<i64>) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    filtered(&api, |r| r.cliente.id == Some(*id))
}

#[get("/reservas/profissional/{id}")]
async fn reservas_by_profissional(
    api: web::Data<MockApi>,
    req: HttpRequest,
    id: web::Path<i64>,
) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    filtered(&api, |r| r.profissional.id == Some(*id))
}

#[get("/reservas/data/{data}")]
async fn reservas_by_date(api: web::Data<MockApi>, req: HttpRequest, data: web::Path<String>) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    filtered(&api, |r| r.data == *data)
}

#[get("/reservas/status/{status}")]
async fn reservas_by_status(
    api: web::Data<MockApi>,
    req: HttpRequest,
    status: web::Path<String>,
) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    match status.parse::<StatusReserva>() {
        Ok(status) => filtered(&api, |r| r.status == status),
        Err(e) => bad_request(e),
    }
}

#[get("/reservas/{id}")]
async fn reservas_get(api: web::Data<MockApi>, req: HttpRequest, id: web::Path<i64>) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    let store = api.store();
    match store.reservas.iter().find(|r| r.id == Some(*id)) {
        Some(reserva) => HttpResponse::Ok().json(reserva),
        None => not_found(),
    }
}

#[post("/reservas")]
async fn reservas_create(api: web::Data<MockApi>, req: HttpRequest, body: web::Json<Value>) -> HttpResponse {
    if let Some(failure) = api.enter(&req, Some(&body.0)) {
        return failure;
    }
    let payload: ReservaPayload = match serde_json::from_value(body.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return bad_request(e),
    };
    let mut store = api.store();
    let (cliente, profissional) = match resolve(&store, &payload) {
        Ok(refs) => refs,
        Err(response) => return response,
    };
    let reserva = Reserva {
        id: Some(store.next_id()),
        cliente,
        profissional,
        data: payload.data,
        hora: payload.hora,
        observacoes: payload.observacoes,
        status: StatusReserva::Pendente,
        criado_em: Some(CREATED_AT.to_string()),
        atualizado_em: None,
    };
    store.reservas.push(reserva.clone());
    HttpResponse::Created().json(reserva)
}

#[put("/reservas/{id}")]
async fn reservas_update(
    api: web::Data<MockApi>,
    req: HttpRequest,
    id: web::Path<i64>,
    body: web::Json<Value>,
) -> HttpResponse {
    if let Some(failure) = api.enter(&req, Some(&body.0)) {
        return failure;
    }
    let payload: ReservaPayload = match serde_json::from_value(body.into_inner()) {
        Ok(payload) => payload,
        Err(e) => return bad_request(e),
    };
    let mut store = api.store();
    let (cliente, profissional) = match resolve(&store, &payload) {
        Ok(refs) => refs,
        Err(response) => return response,
    };
    match store.reservas.iter_mut().find(|r| r.id == Some(*id)) {
        Some(reserva) => {
            reserva.cliente = cliente;
            reserva.profissional = profissional;
            reserva.data = payload.data;
            reserva.hora = payload.hora;
            reserva.observacoes = payload.observacoes;
            reserva.atualizado_em = Some(CREATED_AT.to_string());
            HttpResponse::Ok().json(reserva.clone())
        }
        None => not_found(),
    }
}

#[patch("/reservas/{id}/status")]
async fn reservas_update_status(
    api: web::Data<MockApi>,
    req: HttpRequest,
    id: web::Path<i64>,
    query: Query,
) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    let status = match query.get("status").map(|s| s.parse::<StatusReserva>()) {
        Some(Ok(status)) => status,
        _ => return bad_request("parâmetro 'status' inválido"),
    };
    let mut store = api.store();
    match store.reservas.iter_mut().find(|r| r.id == Some(*id)) {
        Some(reserva) => {
            reserva.status = status;
            HttpResponse::Ok().json(reserva.clone())
        }
        None => not_found(),
    }
}

#[delete("/reservas/{id}")]
async fn reservas_delete(api: web::Data<MockApi>, req: HttpRequest, id: web::Path<i64>) -> HttpResponse {
    if let Some(failure) = api.enter(&req, None) {
        return failure;
    }
    api.store().reservas.retain(|r| r.id != Some(*id));
    HttpResponse::NoContent().finish()
}

fn routes(cfg: &mut web::ServiceConfig) {
    // rotas fixas antes das que capturam `{id}`
    cfg.service(clientes_list)
        .service(clientes_search)
        .service(clientes_by_email)
        .service(clientes_get)
        .service(clientes_create)
        .service(clientes_update)
        .service(clientes_delete);

    cfg.service(profissionais_list)
        .service(profissionais_active)
        .service(profissionais_search)
        .service(profissionais_by_email)
        .service(profissionais_by_especialidade)
        .service(profissionais_get)
        .service(profissionais_create)
        .service(profissionais_update)
        .service(profissionais_set_active)
        .service(profissionais_delete);

    cfg.service(reservas_list)
        .service(reservas_by_period)
        .service(reservas_by_cliente)
        .service(reservas_by_profissional)
        .service(reservas_by_date)
        .service(reservas_by_status)
        .service(reservas_get)
        .service(reservas_create)
        .service(reservas_update)
        .service(reservas_update_status)
        .service(reservas_delete);
}

/// Servidor em execução; para ao sair de escopo
pub struct MockServer {
    pub api: web::Data<MockApi>,
    pub base_url: String,
    handle: ServerHandle,
}

impl MockServer {
    pub async fn start() -> Self {
        let api = web::Data::new(MockApi::default());
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
        let port = listener.local_addr().expect("local addr").port();

        let data = api.clone();
        let server = HttpServer::new(move || {
            App::new()
                .app_data(data.clone())
                .service(web::scope("/api").configure(routes))
        })
        .workers(1)
        .disable_signals()
        .listen(listener)
        .expect("listen")
        .run();

        let handle = server.handle();
        tokio::spawn(server);

        Self {
            api,
            base_url: format!("http://127.0.0.1:{port}/api"),
            handle,
        }
    }

    pub fn config(&self) -> ApiConfig {
        ApiConfig::new(&self.base_url).expect("mock base url")
    }

    pub fn client(&self) -> ApiClient {
        ApiClient::new(&self.config()).expect("api client")
    }
}

impl Drop for MockServer {
    fn drop(&mut self) {
        // o comando de parada é enviado já na chamada
        drop(self.handle.stop(false));
    }
}
